//! Event bus seam and the in-memory LastChange bus
//!
//! - `EventBus`: what a renderer needs from the eventing subsystem
//! - `LastChangeBus`: keeps the latest value per (instance, variable) and
//!   queues accepted events in a bounded channel until they are drained

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TrySendError};
use std::sync::{Arc, Mutex, RwLock};

use tracing::trace;

use crate::event::LastChangeEvent;
use crate::variable::{EventedVariable, InstanceId, VariableKind};
use crate::{BusError, Result};

/// Pending events a [`LastChangeBus`] holds before rejecting new ones
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Receiver of evented values
///
/// Implementations forward values to UPnP subscribers. Every accepted call
/// corresponds to one LastChange notification; implementations must not
/// coalesce repeated identical values.
pub trait EventBus: Send + Sync {
    /// Publish `variable` for the given renderer instance
    fn set_evented_value(&self, instance_id: InstanceId, variable: EventedVariable) -> Result<()>;
}

/// In-memory LastChange bus
///
/// The latest value table is always updated. Events are queued up to the
/// configured capacity; once full, publishes fail with
/// [`BusError::QueueFull`] until the queue is drained. Cloning shares the
/// queue and value table.
///
/// # Example
///
/// ```rust
/// use last_change::{EventBus, EventedVariable, LastChangeBus, TransportState, DEFAULT_INSTANCE_ID};
///
/// let bus = LastChangeBus::new();
/// bus.set_evented_value(
///     DEFAULT_INSTANCE_ID,
///     EventedVariable::TransportState(TransportState::Playing),
/// ).unwrap();
///
/// let events = bus.drain();
/// assert_eq!(events[0].variable, EventedVariable::TransportState(TransportState::Playing));
/// ```
pub struct LastChangeBus {
    values: Arc<RwLock<HashMap<(InstanceId, VariableKind), EventedVariable>>>,

    closed: Arc<AtomicBool>,

    capacity: usize,

    event_tx: mpsc::SyncSender<LastChangeEvent>,

    event_rx: Arc<Mutex<mpsc::Receiver<LastChangeEvent>>>,
}

impl LastChangeBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Bus holding at most `capacity` undrained events (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (event_tx, event_rx) = mpsc::sync_channel(capacity);

        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            closed: Arc::new(AtomicBool::new(false)),
            capacity,
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Latest value published for `kind` on `instance_id`
    pub fn current(&self, instance_id: InstanceId, kind: VariableKind) -> Option<EventedVariable> {
        self.values.read().ok()?.get(&(instance_id, kind)).copied()
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<LastChangeEvent> {
        match self.event_rx.lock() {
            Ok(rx) => rx.try_iter().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stop accepting events; later publishes fail with [`BusError::Closed`]
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl EventBus for LastChangeBus {
    fn set_evented_value(&self, instance_id: InstanceId, variable: EventedVariable) -> Result<()> {
        if self.is_closed() {
            return Err(BusError::Closed);
        }

        if let Ok(mut values) = self.values.write() {
            values.insert((instance_id, variable.kind()), variable);
        }

        match self.event_tx.try_send(LastChangeEvent::new(instance_id, variable)) {
            Ok(()) => {
                trace!(
                    instance_id = %instance_id,
                    service = variable.service().name(),
                    variable = variable.name(),
                    "evented value queued"
                );
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(BusError::QueueFull {
                capacity: self.capacity,
            }),
            // The bus owns its receiver, so this only happens during teardown
            Err(TrySendError::Disconnected(_)) => Err(BusError::Closed),
        }
    }
}

impl Default for LastChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LastChangeBus {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            closed: Arc::clone(&self.closed),
            capacity: self.capacity,
            event_tx: self.event_tx.clone(),
            event_rx: Arc::clone(&self.event_rx),
        }
    }
}

impl std::fmt::Debug for LastChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastChangeBus")
            .field("capacity", &self.capacity)
            .field("closed", &self.is_closed())
            .finish()
    }
}
