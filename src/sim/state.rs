//! Game session state and core simulation types
//!
//! One `GameSession` exists per open game view and is dropped with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::goal::GoalRect;
use crate::consts::*;
use crate::reward;
use crate::tuning::Tuning;

pub const MSG_AIM: &str = "Click and drag to aim your shot!";
pub const MSG_DRAG_UP: &str = "Drag upwards from the ball to shoot!";
pub const MSG_SHOOTING: &str = "Shooting...";
pub const MSG_GOAL: &str = "GOAL! Click to shoot again.";
pub const MSG_MISS: &str = "Missed! Click to try again.";

/// Phase of the current shot round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Waiting for a drag from the ball
    #[default]
    Aim,
    /// Ball in flight, aiming input ignored
    Shooting,
    /// Round over, ball in the net
    Scored,
    /// Round over, ball stopped elsewhere
    Missed,
}

impl ShotPhase {
    /// Scored or Missed: the next pointer-down starts a new round
    pub fn is_round_over(&self) -> bool {
        matches!(self, ShotPhase::Scored | ShotPhase::Missed)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// True while the simulation step is being applied
    pub moving: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: BALL_START,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            moving: false,
        }
    }
}

impl Ball {
    /// Bring the ball to rest where it is
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
    }

    /// Speed along the faster axis, used for the trail cut-off
    pub fn max_axis_speed(&self) -> f32 {
        self.vel.x.abs().max(self.vel.y.abs())
    }
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotGesture {
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
}

impl ShotGesture {
    pub fn begin(at: Vec2) -> Self {
        Self {
            start: Some(at),
            end: Some(at),
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Why a release did not launch the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotRejection {
    /// Release point not far enough above the ball
    NotUpward,
}

/// Observable result of a transition, for logging, sound and HUD updates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RoundEvent {
    /// A drag began on the ball
    GestureStarted { at: Vec2 },
    ShotRejected(ShotRejection),
    /// `power` is capped for display; `velocity` is the uncapped drag scaled
    ShotLaunched { velocity: Vec2, power: f32 },
    GoalScored { score: u32, shots_taken: u32 },
    ShotMissed { shots_taken: u32 },
    RewardUnlocked { code: &'static str },
    RoundReset,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Goals scored
    pub score: u32,
    /// Completed shots
    pub shots_taken: u32,
    pub phase: ShotPhase,
    /// Last status text for the player
    pub message: String,
    pub ball: Ball,
    pub gesture: ShotGesture,
    #[serde(default)]
    pub goal: GoalRect,
    /// Set on the first pointer-down; hides the intro overlay
    pub started: bool,
    #[serde(default, deserialize_with = "validated_tuning")]
    pub tuning: Tuning,
}

/// Snapshots go through the same checks as tuning files
fn validated_tuning<'de, D>(deserializer: D) -> Result<Tuning, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tuning = Tuning::deserialize(deserializer)?;
    tuning.validate().map_err(serde::de::Error::custom)?;
    Ok(tuning)
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameSession {
    /// Create a fresh session ready for the first shot
    pub fn new(tuning: Tuning) -> Self {
        Self {
            score: 0,
            shots_taken: 0,
            phase: ShotPhase::Aim,
            message: MSG_AIM.to_string(),
            ball: Ball::default(),
            gesture: ShotGesture::default(),
            goal: GoalRect::default(),
            started: false,
            tuning,
        }
    }

    /// Start a new round; counters are kept
    pub fn reset_round(&mut self) {
        self.ball = Ball::default();
        self.gesture.clear();
        self.phase = ShotPhase::Aim;
        self.message = MSG_AIM.to_string();
    }

    pub fn set_message(&mut self, message: &str) {
        self.message.clear();
        self.message.push_str(message);
    }

    /// Whether the discount code may be shown
    pub fn reward_unlocked(&self) -> bool {
        reward::is_unlocked(self.score, self.tuning.reward_threshold)
    }

    /// True if the ball currently rests in the scoring region
    pub fn ball_in_goal(&self) -> bool {
        self.goal.contains_ball(self.ball.pos, self.ball.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::default();
        assert_eq!(session.phase, ShotPhase::Aim);
        assert_eq!(session.ball.pos, Vec2::new(400.0, 330.0));
        assert_eq!(session.ball.radius, 18.0);
        assert!(!session.ball.moving);
        assert!(!session.gesture.is_active());
        assert_eq!(session.message, MSG_AIM);
        assert!(!session.reward_unlocked());
    }

    #[test]
    fn test_reset_round_keeps_counters() {
        let mut session = GameSession::default();
        session.score = 2;
        session.shots_taken = 3;
        session.phase = ShotPhase::Missed;
        session.ball.pos = Vec2::new(10.0, 10.0);
        session.ball.vel = Vec2::new(1.0, 1.0);
        session.gesture = ShotGesture::begin(Vec2::ONE);

        session.reset_round();

        assert_eq!(session.phase, ShotPhase::Aim);
        assert_eq!(session.ball, Ball::default());
        assert!(!session.gesture.is_active());
        assert_eq!((session.score, session.shots_taken), (2, 3));
    }

    #[test]
    fn test_snapshot_json() {
        let session = GameSession::default();
        let json = serde_json::to_string(&session).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, session.phase);
        assert_eq!(back.ball, session.ball);
    }

    #[test]
    fn test_snapshot_rejects_invalid_tuning() {
        let mut value = serde_json::to_value(GameSession::default()).unwrap();
        value["tuning"]["friction"] = serde_json::json!(1.0);
        let err = serde_json::from_value::<GameSession>(value).unwrap_err();
        assert!(err.to_string().contains("Friction must be in (0, 1)"));

        let mut value = serde_json::to_value(GameSession::default()).unwrap();
        value.as_object_mut().unwrap().remove("tuning");
        let back: GameSession = serde_json::from_value(value).unwrap();
        assert_eq!(back.tuning, Tuning::default());
    }
}
