//! Model types for the renderer

mod playback_state;
mod volume;

pub use playback_state::PlaybackState;
pub use volume::VolumeLevel;
