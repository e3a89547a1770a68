//! Single simulation step for the ball
//!
//! One call advances exactly one unit of time. Friction is applied per step,
//! so the pace of a shot depends on how often the host steps it.

use super::goal::GoalRect;
use super::state::Ball;
use crate::in_field;
use crate::tuning::Tuning;

/// What happened to the ball during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still travelling
    Rolling,
    /// Entered the goal and was pinned against the back line
    Captured,
    /// Slowed below the stop speed or left the field
    Stopped,
}

/// Advance `ball` by one step.
///
/// A ball that is not moving is left untouched and reported as `Stopped`.
/// When the ball stops outside the goal, the candidate position of this step
/// is discarded and the ball rests where the previous step left it.
pub fn step_ball(ball: &mut Ball, goal: &GoalRect, tuning: &Tuning) -> StepOutcome {
    if !ball.moving {
        return StepOutcome::Stopped;
    }

    let next_pos = ball.pos + ball.vel;
    let next_vel = ball.vel * tuning.friction;

    if goal.contains_ball(next_pos, ball.radius) {
        ball.pos = goal.capture_position(next_pos, ball.radius, tuning.capture_gap);
        ball.halt();
        return StepOutcome::Captured;
    }

    let too_slow = next_vel.x.abs() < tuning.stop_speed && next_vel.y.abs() < tuning.stop_speed;
    if too_slow || !in_field(next_pos) {
        ball.halt();
        return StepOutcome::Stopped;
    }

    ball.pos = next_pos;
    ball.vel = next_vel;
    StepOutcome::Rolling
}
