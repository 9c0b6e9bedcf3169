//! Renderer session
//!
//! One session corresponds to one playback screen: it is opened with a media
//! URI, receives remote keys and media-player callbacks, and ends when the
//! media finishes, fails, or the host tears it down. The host owns the video
//! surface and the renderer service; the session only tracks what it needs to
//! drive the [`PlaybackController`] and render feedback.

use std::sync::Arc;

use last_change::EventBus;
use tracing::{debug, info, warn};

use crate::config::RendererConfig;
use crate::controller::{PlaybackController, SessionSignal};
use crate::error::{Result, SessionError};
use crate::model::{PlaybackState, VolumeLevel};
use crate::notifier::TransportStateNotifier;
use crate::remote::Command;
use crate::toast::{Toast, ToastPlacement};

/// Playback session for a single media URI
#[derive(Debug)]
pub struct RendererSession {
    config: RendererConfig,
    controller: PlaybackController,
    uri: String,
    placement: ToastPlacement,
    /// Loading indicator shown until the media player answers
    loading: bool,
    finished: bool,
    end_reason: Option<SessionError>,
}

impl RendererSession {
    /// Start a session for `uri`
    ///
    /// A missing or blank URI means there is nothing to play; the caller
    /// should show the error to the viewer and close the screen. The config
    /// is validated first, since skip distances feed directly into seeks.
    pub fn open(config: RendererConfig, uri: Option<&str>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SessionError::Config(e.to_string()))?;
        let uri = valid_uri(uri)?;
        let notifier = TransportStateNotifier::new(config.instance_id())
            .with_volume_events(config.volume_events);

        info!(uri = %uri, instance_id = config.instance_id, "opening renderer session");

        Ok(Self {
            config,
            controller: PlaybackController::new(notifier),
            uri,
            placement: ToastPlacement::default(),
            loading: true,
            finished: false,
            end_reason: None,
        })
    }

    /// Size toast offsets for a display of `width` x `height` pixels
    pub fn with_display(mut self, width: u32, height: u32) -> Self {
        self.placement = ToastPlacement::for_display(width, height, &self.config);
        self
    }

    /// Replace the media with a newly requested URI
    ///
    /// A missing URI ends the session.
    pub fn reopen(&mut self, uri: Option<&str>) -> Result<()> {
        if self.finished {
            return Err(SessionError::Finished);
        }
        match valid_uri(uri) {
            Ok(uri) => {
                info!(previous = %self.uri, uri = %uri, "reopening renderer session");
                self.controller.reset();
                self.uri = uri;
                self.loading = true;
                Ok(())
            }
            Err(e) => {
                warn!("reopen without a media URI, ending session");
                self.finish(e.clone());
                Err(e)
            }
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Why the session ended, when it ended on an error
    pub fn end_reason(&self) -> Option<&SessionError> {
        self.end_reason.as_ref()
    }

    /// The renderer service became available
    pub fn bus_connected<B: EventBus + 'static>(&mut self, bus: &Arc<B>) {
        self.controller.notifier_mut().attach(bus);
    }

    /// The renderer service went away
    pub fn bus_disconnected(&mut self) {
        self.controller.notifier_mut().detach();
    }

    /// Media is prepared and playback has started
    pub fn on_prepared(&mut self, duration_ms: i64) {
        if self.ignore_after_finish("prepared") {
            return;
        }
        self.loading = false;
        self.controller.on_media_ready(duration_ms);
    }

    /// The media player reported an error
    pub fn on_error(&mut self, what: i32, extra: i32) -> SessionSignal {
        if self.ignore_after_finish("error") {
            return SessionSignal::Terminate;
        }
        self.loading = false;
        let signal = self.controller.on_media_error(what, extra);
        self.apply(signal, Some(SessionError::Playback { what, extra }));
        signal
    }

    /// Playback reached the end of the media
    pub fn on_completion(&mut self) -> SessionSignal {
        if self.ignore_after_finish("completion") {
            return SessionSignal::Terminate;
        }
        self.loading = false;
        let signal = self.controller.on_media_complete();
        self.apply(signal, None);
        signal
    }

    /// Playback progress reported by the media player
    pub fn on_progress(&mut self, position_ms: i64) {
        if !self.finished {
            self.controller.sync_position(position_ms);
        }
    }

    /// Handle a remote-control key press
    ///
    /// Seek keys return a progress toast. Volume keys are acknowledged here;
    /// the host reports the resulting level through [`Self::handle_volume`].
    pub fn handle_key(&mut self, keycode: i32) -> Option<Toast> {
        let Some(command) = Command::from_keycode(keycode) else {
            debug!(keycode, "unhandled key");
            return None;
        };
        self.handle_command(command)
    }

    pub fn handle_command(&mut self, command: Command) -> Option<Toast> {
        if self.ignore_after_finish("command") {
            return None;
        }

        match command {
            Command::Toggle => {
                self.controller.toggle();
                None
            }
            Command::SeekShortBack
            | Command::SeekShortForward
            | Command::SeekLongBack
            | Command::SeekLongForward => {
                let delta = command.seek_delta(&self.config)?;
                let position = self.controller.seek_relative(delta);
                Some(Toast::progress(
                    position,
                    self.controller.duration_ms(),
                    self.placement,
                ))
            }
            Command::VolumeChanged => {
                debug!("volume key pressed, awaiting level from host");
                None
            }
        }
    }

    /// Host stream volume changed
    pub fn handle_volume(&mut self, level: VolumeLevel) {
        if self.ignore_after_finish("volume") {
            return;
        }
        self.controller.notifier().notify_volume(level);
    }

    /// Tear the session down: report STOPPED, then release the bus
    pub fn destroy(&mut self) {
        info!(uri = %self.uri, "destroying renderer session");
        self.controller.on_session_teardown();
        self.controller.notifier_mut().detach();
        self.finished = true;
        self.loading = false;
    }

    fn apply(&mut self, signal: SessionSignal, reason: Option<SessionError>) {
        if signal == SessionSignal::Terminate {
            self.finished = true;
            self.end_reason = reason;
        }
    }

    fn finish(&mut self, reason: SessionError) {
        self.finished = true;
        self.loading = false;
        self.end_reason = Some(reason);
    }

    fn ignore_after_finish(&self, input: &str) -> bool {
        if self.finished {
            debug!(input, "session finished, ignoring input");
        }
        self.finished
    }
}

fn valid_uri(uri: Option<&str>) -> Result<String> {
    match uri.map(str::trim) {
        Some(uri) if !uri.is_empty() => Ok(uri.to_string()),
        _ => Err(SessionError::MissingUri),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::keycode;
    use last_change::{EventedVariable, LastChangeBus, TransportState, VariableKind};

    fn connected(uri: &str) -> (RendererSession, Arc<LastChangeBus>) {
        let bus = Arc::new(LastChangeBus::new());
        let mut session = RendererSession::open(RendererConfig::default(), Some(uri)).unwrap();
        session.bus_connected(&bus);
        (session, bus)
    }

    fn states(bus: &LastChangeBus) -> Vec<TransportState> {
        bus.drain()
            .into_iter()
            .filter_map(|e| match e.variable {
                EventedVariable::TransportState(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_open_requires_uri() {
        assert_eq!(
            RendererSession::open(RendererConfig::default(), None).unwrap_err(),
            SessionError::MissingUri
        );
        assert_eq!(
            RendererSession::open(RendererConfig::default(), Some("  ")).unwrap_err(),
            SessionError::MissingUri
        );
    }

    #[test]
    fn test_open_rejects_negative_skip() {
        let config = RendererConfig::default().with_skips(-15_000, 180_000);

        let err = RendererSession::open(config, Some("http://x/video.mp4")).unwrap_err();

        assert!(matches!(err, SessionError::Config(ref msg) if msg.contains("short_skip_ms")));
    }

    #[test]
    fn test_open_rejects_minimum_skip() {
        let config = RendererConfig::default().with_skips(15_000, i64::MIN);

        let err = RendererSession::open(config, Some("http://x/video.mp4")).unwrap_err();

        assert!(matches!(err, SessionError::Config(ref msg) if msg.contains("long_skip_ms")));
    }

    #[test]
    fn test_every_seek_key_moves_in_its_direction() {
        let (mut session, _bus) = connected("http://x/video.mp4");
        session.on_prepared(1_000_000);
        session.on_progress(500_000);

        for (key, expected) in [
            (keycode::DPAD_RIGHT, 515_000),
            (keycode::DPAD_LEFT, 500_000),
            (keycode::DPAD_DOWN, 680_000),
            (keycode::DPAD_UP, 500_000),
        ] {
            assert!(session.handle_key(key).is_some());
            assert_eq!(session.controller().position_ms(), expected);
        }
    }

    #[test]
    fn test_loading_indicator() {
        let (mut session, _bus) = connected("http://x/video.mp4");
        assert!(session.is_loading());

        session.on_prepared(100_000);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_toggle_key_has_no_toast() {
        let (mut session, bus) = connected("http://x/video.mp4");
        session.on_prepared(100_000);

        assert_eq!(session.handle_key(keycode::DPAD_CENTER), None);
        assert_eq!(session.state(), PlaybackState::Paused);
        assert_eq!(
            states(&bus),
            vec![TransportState::Playing, TransportState::PausedPlayback]
        );
    }

    #[test]
    fn test_error_ends_session() {
        let (mut session, bus) = connected("http://x/video.mp4");

        assert_eq!(session.on_error(1, -110), SessionSignal::Terminate);
        assert!(session.is_finished());
        assert_eq!(
            session.end_reason(),
            Some(&SessionError::Playback { what: 1, extra: -110 })
        );
        assert_eq!(states(&bus), vec![TransportState::Stopped]);
    }

    #[test]
    fn test_inputs_ignored_after_finish() {
        let (mut session, bus) = connected("http://x/video.mp4");
        session.on_prepared(100_000);
        session.on_completion();
        states(&bus);

        assert_eq!(session.handle_key(keycode::DPAD_RIGHT), None);
        session.on_prepared(100_000);
        assert!(states(&bus).is_empty());
    }

    #[test]
    fn test_reopen_replaces_media() {
        let (mut session, bus) = connected("http://x/one.mp4");
        session.on_prepared(100_000);

        session.reopen(Some("http://x/two.mp4")).unwrap();

        assert_eq!(session.uri(), "http://x/two.mp4");
        assert!(session.is_loading());
        assert!(!session.controller().has_media());
        assert_eq!(
            states(&bus),
            vec![TransportState::Playing, TransportState::Stopped]
        );
    }

    #[test]
    fn test_reopen_without_uri_ends_session() {
        let (mut session, _bus) = connected("http://x/one.mp4");

        assert_eq!(session.reopen(None), Err(SessionError::MissingUri));
        assert!(session.is_finished());
        assert_eq!(session.reopen(Some("http://x/two.mp4")), Err(SessionError::Finished));
    }

    #[test]
    fn test_destroy_reports_stopped_and_detaches() {
        let (mut session, bus) = connected("http://x/video.mp4");
        session.on_prepared(100_000);
        states(&bus);

        session.destroy();

        assert_eq!(states(&bus), vec![TransportState::Stopped]);
        assert!(!session.controller().notifier().is_connected());
    }

    #[test]
    fn test_volume_forwarded_when_enabled() {
        let bus = Arc::new(LastChangeBus::new());
        let config = RendererConfig::default().with_volume_events(true);
        let mut session = RendererSession::open(config, Some("http://x/video.mp4")).unwrap();
        session.bus_connected(&bus);

        assert_eq!(session.handle_key(keycode::VOLUME_UP), None);
        session.handle_volume(VolumeLevel(9));

        assert_eq!(
            bus.current(last_change::DEFAULT_INSTANCE_ID, VariableKind::Volume),
            Some(EventedVariable::Volume(last_change::ChannelVolume::master(9)))
        );
    }
}
