//! Remote-control key mapping
//!
//! A TV remote drives the renderer with the D-pad: center toggles playback,
//! left/right skip a short distance and up/down skip a long distance.

use crate::config::RendererConfig;

/// Android key codes understood by the renderer
pub mod keycode {
    pub const DPAD_UP: i32 = 19;
    pub const DPAD_DOWN: i32 = 20;
    pub const DPAD_LEFT: i32 = 21;
    pub const DPAD_RIGHT: i32 = 22;
    pub const DPAD_CENTER: i32 = 23;
    pub const VOLUME_UP: i32 = 24;
    pub const VOLUME_DOWN: i32 = 25;
    pub const VOLUME_MUTE: i32 = 164;
}

/// Logical control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Toggle,
    SeekShortBack,
    SeekShortForward,
    SeekLongBack,
    SeekLongForward,
    /// Host volume changed; the new level is read from the host
    VolumeChanged,
}

impl Command {
    /// Map a key code to a command, `None` for keys the renderer ignores
    pub fn from_keycode(code: i32) -> Option<Self> {
        match code {
            keycode::DPAD_CENTER => Some(Command::Toggle),
            keycode::DPAD_LEFT => Some(Command::SeekShortBack),
            keycode::DPAD_RIGHT => Some(Command::SeekShortForward),
            keycode::DPAD_UP => Some(Command::SeekLongBack),
            keycode::DPAD_DOWN => Some(Command::SeekLongForward),
            keycode::VOLUME_UP | keycode::VOLUME_DOWN | keycode::VOLUME_MUTE => {
                Some(Command::VolumeChanged)
            }
            _ => None,
        }
    }

    /// Signed seek distance for seek commands
    ///
    /// Backward seeks negate the configured distance with saturation, so even
    /// an unvalidated `i64::MIN` cannot overflow.
    pub fn seek_delta(&self, config: &RendererConfig) -> Option<i64> {
        match self {
            Command::SeekShortBack => Some(config.short_skip_ms.saturating_neg()),
            Command::SeekShortForward => Some(config.short_skip_ms),
            Command::SeekLongBack => Some(config.long_skip_ms.saturating_neg()),
            Command::SeekLongForward => Some(config.long_skip_ms),
            Command::Toggle | Command::VolumeChanged => None,
        }
    }
}
