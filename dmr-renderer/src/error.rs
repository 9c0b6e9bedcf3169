//! Error types for dmr-renderer

use std::path::PathBuf;
use thiserror::Error;

/// Result type for renderer session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that end or prevent a playback session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No playable URI was supplied when the session was opened
    #[error("no valid video address was found")]
    MissingUri,

    /// The media player reported an unrecoverable error
    #[error("media playback failed (what={what}, extra={extra})")]
    Playback { what: i32, extra: i32 },

    /// The renderer config failed validation
    #[error("invalid renderer config: {0}")]
    Config(String),

    /// The session already ended and no longer accepts input
    #[error("playback session has finished")]
    Finished,
}

/// Errors loading a renderer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
