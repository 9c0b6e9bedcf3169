//! Playback controller
//!
//! Owns the playback state, position and duration of one session and turns
//! control inputs and media-player callbacks into state transitions. Every
//! discrete transition is reported through the [`TransportStateNotifier`]
//! exactly once; natural playback progress is not reported.

use tracing::{debug, info, warn};

use crate::model::PlaybackState;
use crate::notifier::TransportStateNotifier;

/// What the host should do with the session after a lifecycle callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Keep the session open
    Continue,
    /// End the session and release the screen
    Terminate,
}

/// Playback state machine for a single renderer session
#[derive(Debug)]
pub struct PlaybackController {
    state: PlaybackState,
    position_ms: i64,
    /// `None` until the media player reports the media ready
    duration_ms: Option<i64>,
    notifier: TransportStateNotifier,
}

impl PlaybackController {
    pub fn new(notifier: TransportStateNotifier) -> Self {
        Self {
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms: None,
            notifier,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_ms(&self) -> i64 {
        self.position_ms
    }

    /// Media duration, or 0 when no media is loaded or the length is unknown
    pub fn duration_ms(&self) -> i64 {
        self.duration_ms.unwrap_or(0).max(0)
    }

    pub fn has_media(&self) -> bool {
        self.duration_ms.is_some()
    }

    pub fn notifier(&self) -> &TransportStateNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut TransportStateNotifier {
        &mut self.notifier
    }

    /// Flip between playing and paused
    ///
    /// Returns the new state, or `None` when no media is loaded.
    pub fn toggle(&mut self) -> Option<PlaybackState> {
        if !self.has_media() {
            debug!("toggle ignored, no media loaded");
            return None;
        }

        let next = if self.state.is_playing() {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        };
        self.transition(next);
        Some(next)
    }

    /// Move the position by `delta_ms`, clamped to `[0, duration]`
    ///
    /// The play/pause state is left untouched. Returns the new position.
    pub fn seek_relative(&mut self, delta_ms: i64) -> i64 {
        let target = self
            .position_ms
            .saturating_add(delta_ms)
            .clamp(0, self.duration_ms());
        debug!(from = self.position_ms, to = target, delta_ms, "seek");
        self.position_ms = target;
        target
    }

    /// Record playback progress reported by the media player
    pub fn sync_position(&mut self, position_ms: i64) {
        self.position_ms = position_ms.clamp(0, self.duration_ms());
    }

    /// The media player finished preparing and started playback
    pub fn on_media_ready(&mut self, duration_ms: i64) {
        if self.duration_ms.is_none() {
            self.duration_ms = Some(duration_ms);
            self.position_ms = 0;
        }
        info!(duration_ms = self.duration_ms(), "media ready");
        self.transition(PlaybackState::Playing);
    }

    /// The media player failed; playback for this session is over
    pub fn on_media_error(&mut self, what: i32, extra: i32) -> SessionSignal {
        warn!(what, extra, "media playback error");
        self.transition(PlaybackState::Stopped);
        SessionSignal::Terminate
    }

    /// Playback reached the end of the media
    pub fn on_media_complete(&mut self) -> SessionSignal {
        info!("media playback complete");
        self.transition(PlaybackState::Stopped);
        SessionSignal::Terminate
    }

    /// Force the stopped state when the session is torn down
    ///
    /// STOPPED is reported even when already stopped.
    pub fn on_session_teardown(&mut self) {
        debug!(previous = ?self.state, "session teardown");
        self.transition(PlaybackState::Stopped);
    }

    /// Drop the loaded media before a new URI is opened
    ///
    /// Reports STOPPED only when leaving a playing or paused state.
    pub fn reset(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.transition(PlaybackState::Stopped);
        }
        self.position_ms = 0;
        self.duration_ms = None;
    }

    fn transition(&mut self, next: PlaybackState) {
        self.state = next;
        self.notifier.notify_state(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use last_change::{EventedVariable, LastChangeBus, TransportState};
    use std::sync::Arc;

    fn attached() -> (PlaybackController, Arc<LastChangeBus>) {
        let bus = Arc::new(LastChangeBus::new());
        let mut notifier = TransportStateNotifier::default();
        notifier.attach(&bus);
        (PlaybackController::new(notifier), bus)
    }

    fn drain(bus: &LastChangeBus) -> Vec<TransportState> {
        bus.drain()
            .into_iter()
            .filter_map(|e| match e.variable {
                EventedVariable::TransportState(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_toggle_without_media_is_noop() {
        let (mut controller, bus) = attached();

        assert_eq!(controller.toggle(), None);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(drain(&bus).is_empty());
    }

    #[test]
    fn test_media_ready_starts_playing() {
        let (mut controller, bus) = attached();

        controller.on_media_ready(100_000);

        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.duration_ms(), 100_000);
        assert_eq!(drain(&bus), vec![TransportState::Playing]);
    }

    #[test]
    fn test_toggle_pause_and_resume() {
        let (mut controller, bus) = attached();
        controller.on_media_ready(100_000);
        drain(&bus);

        assert_eq!(controller.toggle(), Some(PlaybackState::Paused));
        assert_eq!(controller.toggle(), Some(PlaybackState::Playing));
        assert_eq!(
            drain(&bus),
            vec![TransportState::PausedPlayback, TransportState::Playing]
        );
    }

    #[test]
    fn test_toggle_from_stopped_with_media_plays() {
        let (mut controller, bus) = attached();
        controller.on_media_ready(100_000);
        controller.on_session_teardown();
        drain(&bus);

        assert_eq!(controller.toggle(), Some(PlaybackState::Playing));
        assert_eq!(drain(&bus), vec![TransportState::Playing]);
    }

    #[test]
    fn test_seek_clamps_and_keeps_state() {
        let (mut controller, bus) = attached();
        controller.on_media_ready(100_000);
        controller.sync_position(20_000);
        drain(&bus);

        assert_eq!(controller.seek_relative(-15_000), 5_000);
        assert_eq!(controller.seek_relative(-15_000), 0);
        controller.sync_position(95_000);
        assert_eq!(controller.seek_relative(180_000), 100_000);
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert!(drain(&bus).is_empty());
    }

    #[test]
    fn test_seek_with_unknown_duration_collapses_to_zero() {
        let (mut controller, _bus) = attached();
        controller.on_media_ready(-1);

        assert_eq!(controller.seek_relative(15_000), 0);
        assert_eq!(controller.duration_ms(), 0);
    }

    #[test]
    fn test_seek_does_not_overflow() {
        let (mut controller, _bus) = attached();
        controller.on_media_ready(100_000);
        controller.sync_position(50_000);

        assert_eq!(controller.seek_relative(i64::MAX), 100_000);
        assert_eq!(controller.seek_relative(i64::MIN), 0);
    }

    #[test]
    fn test_error_and_complete_terminate() {
        let (mut controller, bus) = attached();
        controller.on_media_ready(100_000);
        drain(&bus);

        assert_eq!(controller.on_media_error(1, -1004), SessionSignal::Terminate);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(drain(&bus), vec![TransportState::Stopped]);

        assert_eq!(controller.on_media_complete(), SessionSignal::Terminate);
        assert_eq!(drain(&bus), vec![TransportState::Stopped]);
    }

    #[test]
    fn test_teardown_always_notifies() {
        let (mut controller, bus) = attached();

        controller.on_session_teardown();
        controller.on_session_teardown();

        assert_eq!(
            drain(&bus),
            vec![TransportState::Stopped, TransportState::Stopped]
        );
    }

    #[test]
    fn test_reset_clears_media() {
        let (mut controller, bus) = attached();
        controller.on_media_ready(100_000);
        controller.sync_position(40_000);
        drain(&bus);

        controller.reset();

        assert!(!controller.has_media());
        assert_eq!(controller.position_ms(), 0);
        assert_eq!(drain(&bus), vec![TransportState::Stopped]);

        controller.reset();
        assert!(drain(&bus).is_empty());
    }

    #[test]
    fn test_transitions_without_bus_still_apply() {
        let mut controller = PlaybackController::new(TransportStateNotifier::default());

        controller.on_media_ready(10_000);
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.toggle(), Some(PlaybackState::Paused));
    }
}
