//! Data-driven gameplay constants
//!
//! Defaults reproduce the shipped game. A host may override any subset from
//! JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Friction must be in (0, 1), got {0}")]
    Friction(f32),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("Reward threshold must be at least 1")]
    RewardThreshold,
}

/// Gameplay constants for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-step multiplicative velocity decay
    pub friction: f32,
    /// Ball stops once both velocity components fall below this
    pub stop_speed: f32,
    /// Launch velocity per unit of drag
    pub velocity_scale: f32,
    /// Reported shot power is capped here (does not affect velocity)
    pub power_cap: f32,
    /// Extra grab distance around the ball for starting a drag
    pub grab_slack: f32,
    /// Release point must be this far above the ball
    pub min_upward_drag: f32,
    /// Distance between a captured ball and the goal's back line
    pub capture_gap: f32,
    /// Goals needed to reveal the discount code
    pub reward_threshold: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.99,
            stop_speed: 0.5,
            velocity_scale: 0.18,
            power_cap: 180.0,
            grab_slack: 10.0,
            min_upward_drag: 10.0,
            capture_gap: 2.0,
            reward_threshold: 5,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every constant is usable; friction < 1 and a positive stop
    /// speed are what guarantee a shot comes to rest.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(TuningError::Friction(self.friction));
        }

        for (field, value) in [
            ("stop_speed", self.stop_speed),
            ("velocity_scale", self.velocity_scale),
            ("power_cap", self.power_cap),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("grab_slack", self.grab_slack),
            ("min_upward_drag", self.min_upward_drag),
            ("capture_gap", self.capture_gap),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.reward_threshold == 0 {
            return Err(TuningError::RewardThreshold);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "friction": 0.97, "reward_threshold": 3 }"#).unwrap();
        assert_eq!(tuning.friction, 0.97);
        assert_eq!(tuning.reward_threshold, 3);
        assert_eq!(tuning.velocity_scale, 0.18);
        assert_eq!(tuning.power_cap, 180.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "friction": 1.0 }"#),
            Err(TuningError::Friction(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "stop_speed": 0.0 }"#),
            Err(TuningError::NotPositive { field: "stop_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "grab_slack": -1.0 }"#),
            Err(TuningError::Negative { field: "grab_slack", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "reward_threshold": 0 }"#),
            Err(TuningError::RewardThreshold)
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::from_file("/nonexistent/shootout-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = Tuning::from_json(r#"{ "power_cap": -5.0 }"#).unwrap_err();
        assert_eq!(err.to_string(), "power_cap must be positive, got -5");
    }
}
