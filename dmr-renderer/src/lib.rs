//! DLNA Renderer Playback Core
//!
//! Translates remote-control input and media-player callbacks into playback
//! state, and reports transport state and volume to UPnP control points
//! through a LastChange event bus.
//!
//! # Architecture
//!
//! ```text
//! key / media callback → RendererSession → PlaybackController
//!                                               │ transition
//!                                               ▼
//!                                     TransportStateNotifier ──▶ EventBus
//!                                        (weak reference)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dmr_renderer::{RendererConfig, RendererSession, PlaybackState};
//! use dmr_renderer::remote::keycode;
//! use last_change::LastChangeBus;
//!
//! let bus = Arc::new(LastChangeBus::new());
//! let mut session = RendererSession::open(RendererConfig::default(), Some("http://x/video.mp4"))?;
//! session.bus_connected(&bus);
//!
//! session.on_prepared(100_000);
//! session.on_progress(20_000);
//! let toast = session.handle_key(keycode::DPAD_LEFT);
//!
//! assert_eq!(session.state(), PlaybackState::Playing);
//! assert_eq!(toast.map(|t| t.text), Some("00:05 / 01:40".to_string()));
//! # Ok::<(), dmr_renderer::SessionError>(())
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod remote;
pub mod session;
pub mod time_format;
pub mod toast;

pub use config::RendererConfig;
pub use controller::{PlaybackController, SessionSignal};
pub use error::{ConfigError, Result, SessionError};
pub use model::{PlaybackState, VolumeLevel};
pub use notifier::TransportStateNotifier;
pub use remote::Command;
pub use session::RendererSession;
pub use time_format::{format_duration, format_progress};
pub use toast::{Gravity, Toast, ToastPlacement};
