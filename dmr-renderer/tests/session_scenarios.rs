//! End-to-end renderer session scenarios against the in-memory bus

use rstest::rstest;
use std::sync::Arc;

use dmr_renderer::remote::keycode;
use dmr_renderer::{PlaybackState, RendererConfig, RendererSession, SessionError};
use last_change::{
    EventedVariable, LastChangeBus, TransportState, VariableKind, DEFAULT_INSTANCE_ID,
};

fn open(uri: &str) -> (RendererSession, Arc<LastChangeBus>) {
    let bus = Arc::new(LastChangeBus::new());
    let mut session = RendererSession::open(RendererConfig::default(), Some(uri))
        .expect("session should open");
    session.bus_connected(&bus);
    (session, bus)
}

fn transport_states(bus: &LastChangeBus) -> Vec<TransportState> {
    bus.drain()
        .into_iter()
        .filter_map(|e| match e.variable {
            EventedVariable::TransportState(state) => Some(state),
            _ => None,
        })
        .collect()
}

#[test]
fn test_media_ready_reports_playing_once() {
    let (mut session, bus) = open("http://x/video.mp4");

    session.on_prepared(100_000);

    assert_eq!(session.state(), PlaybackState::Playing);
    let events = bus.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].instance_id, DEFAULT_INSTANCE_ID);
    assert_eq!(
        events[0].variable,
        EventedVariable::TransportState(TransportState::Playing)
    );
}

#[rstest]
#[case::short_back(20_000, keycode::DPAD_LEFT, 5_000, "00:05 / 01:40")]
#[case::short_forward(20_000, keycode::DPAD_RIGHT, 35_000, "00:35 / 01:40")]
#[case::long_back(20_000, keycode::DPAD_UP, 0, "00:00 / 01:40")]
#[case::long_forward_near_end(95_000, keycode::DPAD_DOWN, 100_000, "01:40 / 01:40")]
fn test_seek_keys(
    #[case] start: i64,
    #[case] key: i32,
    #[case] expected_position: i64,
    #[case] expected_text: &str,
) {
    let (mut session, bus) = open("http://x/video.mp4");
    session.on_prepared(100_000);
    session.on_progress(start);
    transport_states(&bus);

    let toast = session.handle_key(key).expect("seek keys show progress");

    assert_eq!(session.controller().position_ms(), expected_position);
    assert_eq!(toast.text, expected_text);
    assert_eq!(session.state(), PlaybackState::Playing);
    assert!(transport_states(&bus).is_empty());
}

#[test]
fn test_toast_placement_follows_display() {
    let (session, _bus) = open("http://x/video.mp4");
    let mut session = session.with_display(1280, 720);
    session.on_prepared(100_000);

    let toast = session.handle_key(keycode::DPAD_RIGHT).unwrap();

    assert_eq!(toast.placement.offset_x, 256);
    assert_eq!(toast.placement.offset_y, 108);
}

#[test]
fn test_missing_bus_is_silent() {
    let mut session =
        RendererSession::open(RendererConfig::default(), Some("http://x/video.mp4")).unwrap();

    session.on_prepared(100_000);
    session.on_progress(20_000);
    let toast = session.handle_key(keycode::DPAD_LEFT);
    session.handle_key(keycode::DPAD_CENTER);

    assert_eq!(toast.map(|t| t.text), Some("00:05 / 01:40".to_string()));
    assert_eq!(session.state(), PlaybackState::Paused);
}

#[test]
fn test_bus_connected_midway_receives_later_transitions() {
    let bus = Arc::new(LastChangeBus::new());
    let mut session =
        RendererSession::open(RendererConfig::default(), Some("http://x/video.mp4")).unwrap();

    session.on_prepared(100_000);
    session.bus_connected(&bus);
    session.handle_key(keycode::DPAD_CENTER);

    assert_eq!(transport_states(&bus), vec![TransportState::PausedPlayback]);
}

#[test]
fn test_missing_uri_never_starts() {
    let err = RendererSession::open(RendererConfig::default(), None).unwrap_err();
    assert_eq!(err, SessionError::MissingUri);
    assert_eq!(err.to_string(), "no valid video address was found");
}

#[test]
fn test_full_lifecycle() {
    let (mut session, bus) = open("http://x/video.mp4");

    session.on_prepared(100_000);
    session.handle_key(keycode::DPAD_CENTER);
    session.handle_key(keycode::DPAD_CENTER);
    session.on_completion();
    session.destroy();

    assert!(session.is_finished());
    assert_eq!(
        transport_states(&bus),
        vec![
            TransportState::Playing,
            TransportState::PausedPlayback,
            TransportState::Playing,
            TransportState::Stopped,
            TransportState::Stopped,
        ]
    );
    assert_eq!(
        bus.current(DEFAULT_INSTANCE_ID, VariableKind::TransportState),
        Some(EventedVariable::TransportState(TransportState::Stopped))
    );
}

#[test]
fn test_configured_instance_id_is_used() {
    let bus = Arc::new(LastChangeBus::new());
    let config = RendererConfig::default().with_instance_id(2);
    let mut session = RendererSession::open(config, Some("http://x/video.mp4")).unwrap();
    session.bus_connected(&bus);

    session.on_prepared(1_000);

    let event = bus.drain().remove(0);
    assert_eq!(event.instance_id.value(), 2);
}
