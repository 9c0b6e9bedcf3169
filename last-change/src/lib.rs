//! LastChange eventing for a DLNA media renderer
//!
//! UPnP renderers report state through the `LastChange` variable of their
//! AVTransport and RenderingControl services. This crate defines the values
//! a renderer publishes and the bus they are published on.
//!
//! # Quick Start
//!
//! ```rust
//! use last_change::prelude::*;
//!
//! let bus = LastChangeBus::new();
//! bus.set_evented_value(
//!     DEFAULT_INSTANCE_ID,
//!     EventedVariable::Volume(ChannelVolume::master(40)),
//! ).unwrap();
//!
//! for event in bus.drain() {
//!     println!("{} on {}", event.variable.name(), event.service().name());
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! renderer ──set_evented_value──▶ EventBus
//!                                   │
//!                        LastChangeBus (in-memory)
//!                                   ├── values: (InstanceId, VariableKind) -> EventedVariable
//!                                   └── bounded mpsc queue ──▶ drain()
//! ```

pub mod bus;
pub mod error;
pub mod event;
pub mod variable;

pub use bus::{EventBus, LastChangeBus, DEFAULT_QUEUE_CAPACITY};
pub use error::{BusError, Result};
pub use event::LastChangeEvent;
pub use variable::{
    Channel, ChannelVolume, EventedVariable, InstanceId, Service, TransportState, VariableKind,
    DEFAULT_INSTANCE_ID,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bus::{EventBus, LastChangeBus};
    pub use crate::event::LastChangeEvent;
    pub use crate::variable::{
        ChannelVolume, EventedVariable, InstanceId, TransportState, VariableKind,
        DEFAULT_INSTANCE_ID,
    };
}
