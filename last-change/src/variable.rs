//! Evented state variables carried inside LastChange notifications
//!
//! A renderer reports state changes through two UPnP services:
//! - AVTransport publishes `TransportState`
//! - RenderingControl publishes per-channel `Volume`
//!
//! Each value is tagged with the logical [`InstanceId`] of the renderer
//! that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BusError;

/// Logical renderer instance identifier
///
/// A device hosting a single renderer always reports instance `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

/// Instance id used by a device that hosts exactly one renderer
pub const DEFAULT_INSTANCE_ID: InstanceId = InstanceId(0);

impl InstanceId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        DEFAULT_INSTANCE_ID
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        InstanceId(id)
    }
}

/// UPnP service that owns an evented variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    AVTransport,
    RenderingControl,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::AVTransport => "AVTransport",
            Service::RenderingControl => "RenderingControl",
        }
    }
}

/// AVTransport `TransportState` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportState {
    Stopped,
    Playing,
    PausedPlayback,
    Transitioning,
    NoMediaPresent,
}

impl TransportState {
    /// Wire representation used in LastChange payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportState::Stopped => "STOPPED",
            TransportState::Playing => "PLAYING",
            TransportState::PausedPlayback => "PAUSED_PLAYBACK",
            TransportState::Transitioning => "TRANSITIONING",
            TransportState::NoMediaPresent => "NO_MEDIA_PRESENT",
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportState {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STOPPED" => Ok(TransportState::Stopped),
            "PLAYING" => Ok(TransportState::Playing),
            "PAUSED_PLAYBACK" => Ok(TransportState::PausedPlayback),
            "TRANSITIONING" => Ok(TransportState::Transitioning),
            "NO_MEDIA_PRESENT" => Ok(TransportState::NoMediaPresent),
            _ => Err(BusError::UnknownTransportState(s.to_string())),
        }
    }
}

/// Audio channel addressed by a RenderingControl variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Master,
}

/// Volume level of a single channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelVolume {
    pub channel: Channel,
    pub volume: u16,
}

impl ChannelVolume {
    pub fn master(volume: u16) -> Self {
        Self {
            channel: Channel::Master,
            volume,
        }
    }
}

/// Which state variable an [`EventedVariable`] sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    TransportState,
    Volume,
}

impl VariableKind {
    /// State variable name as it appears in the LastChange payload
    pub fn name(&self) -> &'static str {
        match self {
            VariableKind::TransportState => "TransportState",
            VariableKind::Volume => "Volume",
        }
    }
}

/// A single evented value published through LastChange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventedVariable {
    TransportState(TransportState),
    Volume(ChannelVolume),
}

impl EventedVariable {
    pub fn kind(&self) -> VariableKind {
        match self {
            EventedVariable::TransportState(_) => VariableKind::TransportState,
            EventedVariable::Volume(_) => VariableKind::Volume,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Service whose LastChange carries this variable
    pub fn service(&self) -> Service {
        match self {
            EventedVariable::TransportState(_) => Service::AVTransport,
            EventedVariable::Volume(_) => Service::RenderingControl,
        }
    }
}
