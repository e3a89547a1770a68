//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `GameInput::Frame`
//! - All state in a single owned `GameSession`
//! - No rendering or platform dependencies

pub mod goal;
pub mod shot;
pub mod state;
pub mod step;
pub mod tick;

pub use goal::GoalRect;
pub use shot::{pointer_down, pointer_move, pointer_up};
pub use state::{Ball, GameSession, RoundEvent, ShotGesture, ShotPhase, ShotRejection};
pub use step::{StepOutcome, step_ball};
pub use tick::{GameInput, advance, apply};
