//! Transport state notifier
//!
//! Forwards playback transitions and volume changes to the LastChange event
//! bus. The bus is owned by the hosting renderer service; the notifier only
//! keeps a weak reference and skips notifications while it is absent.

use std::sync::{Arc, Weak};

use last_change::{ChannelVolume, EventBus, EventedVariable, InstanceId, DEFAULT_INSTANCE_ID};
use tracing::debug;

use crate::model::{PlaybackState, VolumeLevel};

/// Publishes renderer state to a weakly-held [`EventBus`]
pub struct TransportStateNotifier {
    bus: Option<Weak<dyn EventBus>>,
    instance_id: InstanceId,
    volume_events: bool,
}

impl TransportStateNotifier {
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            bus: None,
            instance_id,
            volume_events: false,
        }
    }

    /// Enable forwarding of volume changes (off by default)
    pub fn with_volume_events(mut self, enabled: bool) -> Self {
        self.volume_events = enabled;
        self
    }

    /// Associate with a bus without taking ownership of it
    pub fn attach<B: EventBus + 'static>(&mut self, bus: &Arc<B>) {
        let weak: Weak<B> = Arc::downgrade(bus);
        self.bus = Some(weak);
        debug!(instance_id = %self.instance_id, "event bus attached");
    }

    pub fn detach(&mut self) {
        if self.bus.take().is_some() {
            debug!(instance_id = %self.instance_id, "event bus detached");
        }
    }

    /// Whether a live bus is currently reachable
    pub fn is_connected(&self) -> bool {
        self.bus.as_ref().and_then(Weak::upgrade).is_some()
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn volume_events_enabled(&self) -> bool {
        self.volume_events
    }

    /// Publish a transport state change
    ///
    /// Returns whether the bus accepted the value. A missing or failing bus
    /// is not an error for the caller.
    pub fn notify_state(&self, state: PlaybackState) -> bool {
        self.publish(EventedVariable::TransportState(state.transport_state()))
    }

    /// Publish a master volume change, if volume events are enabled
    pub fn notify_volume(&self, level: VolumeLevel) -> bool {
        if !self.volume_events {
            debug!(volume = %level, "volume events disabled, skipping");
            return false;
        }
        self.publish(EventedVariable::Volume(ChannelVolume::master(level.value())))
    }

    fn publish(&self, variable: EventedVariable) -> bool {
        let Some(bus) = self.bus.as_ref().and_then(Weak::upgrade) else {
            debug!(variable = variable.name(), "no event bus connected, skipping notification");
            return false;
        };

        match bus.set_evented_value(self.instance_id, variable) {
            Ok(()) => {
                debug!(
                    instance_id = %self.instance_id,
                    variable = ?variable,
                    "notified {}",
                    variable.service().name()
                );
                true
            }
            Err(e) => {
                debug!(error = %e, variable = variable.name(), "event bus rejected notification");
                false
            }
        }
    }
}

impl Default for TransportStateNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_INSTANCE_ID)
    }
}

impl std::fmt::Debug for TransportStateNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportStateNotifier")
            .field("instance_id", &self.instance_id)
            .field("connected", &self.is_connected())
            .field("volume_events", &self.volume_events)
            .finish()
    }
}
