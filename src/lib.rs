//! Penalty Shootout - the storefront's "play to unlock a discount" mini-game
//!
//! Core modules:
//! - `audio`: Procedural sound effects for round events
//! - `sim`: Deterministic simulation (ball step, shot input, round state machine)
//! - `tuning`: Data-driven gameplay constants
//! - `reward`: Discount reveal after enough goals
//! - `renderer`: WebGPU presentation of a session
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Stored presentation preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod reward;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation step (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions (field units, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    pub const BALL_START: Vec2 = Vec2::new(400.0, 330.0);

    /// Goal mouth, seen from the front
    pub const GOAL_ORIGIN: Vec2 = Vec2::new(300.0, 80.0);
    pub const GOAL_WIDTH: f32 = 200.0;
    pub const GOAL_HEIGHT: f32 = 60.0;

    /// Penalty spot (decoration only)
    pub const PENALTY_SPOT: Vec2 = Vec2::new(400.0, 270.0);

    /// Sky/pitch boundary as a fraction of field height
    pub const HORIZON: f32 = 0.6;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Length of a vector
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Scale `v` down to `max` length if it is longer, else return it unchanged
#[inline]
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

/// True if `pos` lies within the field rectangle (edges included)
#[inline]
pub fn in_field(pos: Vec2) -> bool {
    use consts::{FIELD_HEIGHT, FIELD_WIDTH};
    pos.x >= 0.0 && pos.x <= FIELD_WIDTH && pos.y >= 0.0 && pos.y <= FIELD_HEIGHT
}
