//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Mapping display pixels to field units
//! - Input event subscriptions (released on drop)
//! - The animation-frame loop

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Maps pointer offsets inside the displayed canvas to field coordinates.
///
/// The canvas may be displayed at any size; the field is always 800×400.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMapper {
    /// Displayed canvas size in CSS pixels
    pub display_size: Vec2,
}

impl FieldMapper {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            display_size: Vec2::new(width, height),
        }
    }

    /// Convert an offset from the canvas' top-left corner to field units
    pub fn to_field(&self, offset: Vec2) -> Vec2 {
        if self.display_size.x <= 0.0 || self.display_size.y <= 0.0 {
            return Vec2::ZERO;
        }
        offset / self.display_size * Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

/// Where the game view is in its open/close lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountPhase {
    #[default]
    Closed,
    /// Async setup in progress; a close may already have been asked for
    Mounting { close_requested: bool },
    Open,
}

/// Serialises open and close requests around an async mount.
///
/// At most one mount runs at a time, and a close that arrives mid-mount
/// discards the host once it is ready.
#[derive(Debug, Default)]
pub struct MountGate {
    phase: MountPhase,
}

impl MountGate {
    pub fn phase(&self) -> MountPhase {
        self.phase
    }

    /// Start mounting; false if already mounting or open
    pub fn try_begin(&mut self) -> bool {
        if self.phase != MountPhase::Closed {
            return false;
        }
        self.phase = MountPhase::Mounting {
            close_requested: false,
        };
        true
    }

    /// Ask to close. Returns true if an open host must be dropped now.
    pub fn request_close(&mut self) -> bool {
        match self.phase {
            MountPhase::Open => {
                self.phase = MountPhase::Closed;
                true
            }
            MountPhase::Mounting { .. } => {
                self.phase = MountPhase::Mounting {
                    close_requested: true,
                };
                false
            }
            MountPhase::Closed => false,
        }
    }

    /// Mount finished. Returns true if the new host should be kept.
    pub fn finish(&mut self, mounted: bool) -> bool {
        let keep = matches!(
            self.phase,
            MountPhase::Mounting {
                close_requested: false
            }
        ) && mounted;
        self.phase = if keep {
            MountPhase::Open
        } else {
            MountPhase::Closed
        };
        keep
    }
}
