//! Transient on-screen messages

use crate::config::RendererConfig;
use crate::time_format::format_progress;

/// Screen anchor for a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    BottomRight,
}

/// Where a toast is drawn, in pixels from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastPlacement {
    pub gravity: Gravity,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl ToastPlacement {
    /// Placement for a display of the given size
    pub fn for_display(width: u32, height: u32, config: &RendererConfig) -> Self {
        Self {
            gravity: Gravity::BottomRight,
            offset_x: (width as f32 * config.toast_offset_x_ratio) as u32,
            offset_y: (height as f32 * config.toast_offset_y_ratio) as u32,
        }
    }
}

impl Default for ToastPlacement {
    fn default() -> Self {
        Self {
            gravity: Gravity::BottomRight,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

/// Message shown to the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub placement: ToastPlacement,
}

impl Toast {
    /// `"<position> / <duration>"` progress message shown after a seek
    pub fn progress(position_ms: i64, duration_ms: i64, placement: ToastPlacement) -> Self {
        Self {
            text: format_progress(position_ms, duration_ms),
            placement,
        }
    }
}
