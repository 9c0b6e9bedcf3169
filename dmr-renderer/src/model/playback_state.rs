//! Playback state enumeration

use last_change::TransportState;
use serde::{Deserialize, Serialize};

/// Playback lifecycle of the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No media playing; either nothing loaded yet or the session ended
    #[default]
    Stopped,
    /// Media is playing
    Playing,
    /// Playback is paused
    Paused,
}

impl PlaybackState {
    /// AVTransport state reported to control points
    pub fn transport_state(&self) -> TransportState {
        match self {
            PlaybackState::Stopped => TransportState::Stopped,
            PlaybackState::Playing => TransportState::Playing,
            PlaybackState::Paused => TransportState::PausedPlayback,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}
