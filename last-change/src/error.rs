//! Error types for the LastChange event bus

use thiserror::Error;

/// Errors returned when publishing an evented value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The bus has been torn down and no longer accepts events
    #[error("event bus is closed")]
    Closed,

    /// The event queue is at capacity; drain it before publishing more
    #[error("event queue is full ({capacity} pending events)")]
    QueueFull { capacity: usize },

    /// A string could not be parsed into a transport state
    #[error("unknown transport state: {0}")]
    UnknownTransportState(String),
}

/// Result type for LastChange operations
pub type Result<T> = std::result::Result<T, BusError>;
