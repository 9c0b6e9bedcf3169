//! Renderer configuration
//!
//! All fields have defaults matching a single-instance television renderer,
//! so a config file only needs to name the values it overrides.

use std::path::Path;

use last_change::InstanceId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a renderer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Logical instance id attached to every LastChange notification
    /// Default: 0
    pub instance_id: u32,

    /// Seek distance for left/right remote keys, in milliseconds
    /// Default: 15000
    pub short_skip_ms: i64,

    /// Seek distance for up/down remote keys, in milliseconds
    /// Default: 180000
    pub long_skip_ms: i64,

    /// Forward volume-key changes to RenderingControl
    /// Default: false
    pub volume_events: bool,

    /// Horizontal toast offset as a fraction of display width
    /// Default: 0.2
    pub toast_offset_x_ratio: f32,

    /// Vertical toast offset as a fraction of display height
    /// Default: 0.15
    pub toast_offset_y_ratio: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            instance_id: 0,
            short_skip_ms: 15_000,
            long_skip_ms: 180_000,
            volume_events: false,
            toast_offset_x_ratio: 0.2,
            toast_offset_y_ratio: 0.15,
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config, filling unspecified fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RendererConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_skip_ms <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "short_skip_ms",
                reason: format!("must be positive, got {}", self.short_skip_ms),
            });
        }
        if self.long_skip_ms <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "long_skip_ms",
                reason: format!("must be positive, got {}", self.long_skip_ms),
            });
        }
        for (field, ratio) in [
            ("toast_offset_x_ratio", self.toast_offset_x_ratio),
            ("toast_offset_y_ratio", self.toast_offset_y_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be within 0.0..=1.0, got {}", ratio),
                });
            }
        }
        Ok(())
    }

    pub fn instance_id(&self) -> InstanceId {
        InstanceId(self.instance_id)
    }

    pub fn with_instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    pub fn with_skips(mut self, short_skip_ms: i64, long_skip_ms: i64) -> Self {
        self.short_skip_ms = short_skip_ms;
        self.long_skip_ms = long_skip_ms;
        self
    }

    pub fn with_volume_events(mut self, enabled: bool) -> Self {
        self.volume_events = enabled;
        self
    }

    pub fn with_toast_offsets(mut self, x_ratio: f32, y_ratio: f32) -> Self {
        self.toast_offset_x_ratio = x_ratio;
        self.toast_offset_y_ratio = y_ratio;
        self
    }
}
