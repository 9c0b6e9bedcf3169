//! LastChange events
//!
//! Every evented value accepted by a bus is recorded as a `LastChangeEvent`
//! carrying the instance id and the variable that was set.

use std::time::Instant;

use crate::variable::{EventedVariable, InstanceId, Service};

/// An evented value accepted by the bus
#[derive(Debug, Clone)]
pub struct LastChangeEvent {
    /// Renderer instance that produced the value
    pub instance_id: InstanceId,

    /// The variable and its new value
    pub variable: EventedVariable,

    /// When the value was published
    pub timestamp: Instant,
}

impl LastChangeEvent {
    pub fn new(instance_id: InstanceId, variable: EventedVariable) -> Self {
        Self {
            instance_id,
            variable,
            timestamp: Instant::now(),
        }
    }

    pub fn service(&self) -> Service {
        self.variable.service()
    }
}

impl PartialEq for LastChangeEvent {
    fn eq(&self, other: &Self) -> bool {
        // Timestamp not included in equality
        self.instance_id == other.instance_id && self.variable == other.variable
    }
}
