//! Volume level observed from the host audio subsystem

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream volume as reported by the host
///
/// The range is device-defined; the renderer only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct VolumeLevel(pub u16);

impl VolumeLevel {
    pub fn new(level: u16) -> Self {
        Self(level)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for VolumeLevel {
    fn from(level: u16) -> Self {
        VolumeLevel(level)
    }
}
