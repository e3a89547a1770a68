//! Goal mouth geometry
//!
//! The goal is an axis-aligned rectangle seen from the front. It is both the
//! scoring region and the region that catches the ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GOAL_HEIGHT, GOAL_ORIGIN, GOAL_WIDTH};

/// Goal rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRect {
    /// Top-left corner (crossbar, left post)
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for GoalRect {
    fn default() -> Self {
        Self::new(GOAL_ORIGIN, GOAL_WIDTH, GOAL_HEIGHT)
    }
}

impl GoalRect {
    pub const fn new(origin: Vec2, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Back line of the net
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.height
    }

    /// True if a ball of `radius` centred at `pos` lies strictly inside the
    /// goal with clearance `radius` on every side.
    pub fn contains_ball(&self, pos: Vec2, radius: f32) -> bool {
        pos.x > self.left() + radius
            && pos.x < self.right() - radius
            && pos.y > self.top() + radius
            && pos.y < self.bottom() - radius
    }

    /// Where a captured ball comes to rest: same x, pinned against the back line
    pub fn capture_position(&self, pos: Vec2, radius: f32, gap: f32) -> Vec2 {
        Vec2::new(pos.x, self.bottom() - radius - gap)
    }

    /// Net line positions: `divisions - 1` interior lines each way
    pub fn net_lines(&self, divisions: u32) -> (Vec<f32>, Vec<f32>) {
        let divisions = divisions.max(1);
        let rows = (1..divisions)
            .map(|i| self.top() + self.height / divisions as f32 * i as f32)
            .collect();
        let cols = (1..divisions)
            .map(|i| self.left() + self.width / divisions as f32 * i as f32)
            .collect();
        (rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;

    #[test]
    fn test_edges() {
        let goal = GoalRect::default();
        assert_eq!(goal.left(), 300.0);
        assert_eq!(goal.right(), 500.0);
        assert_eq!(goal.top(), 80.0);
        assert_eq!(goal.bottom(), 140.0);
    }

    #[test]
    fn test_contains_ball_is_inset_and_strict() {
        let goal = GoalRect::default();
        assert!(goal.contains_ball(Vec2::new(400.0, 110.0), BALL_RADIUS));
        // Touching the inset boundary does not count
        assert!(!goal.contains_ball(Vec2::new(318.0, 110.0), BALL_RADIUS));
        assert!(!goal.contains_ball(Vec2::new(400.0, 122.0), BALL_RADIUS));
        // Inside the frame but overlapping a post
        assert!(!goal.contains_ball(Vec2::new(310.0, 110.0), BALL_RADIUS));
        assert!(!goal.contains_ball(Vec2::new(400.0, 200.0), BALL_RADIUS));
    }

    #[test]
    fn test_capture_position_stays_in_goal() {
        let goal = GoalRect::default();
        let pos = goal.capture_position(Vec2::new(450.0, 101.0), BALL_RADIUS, 2.0);
        assert_eq!(pos, Vec2::new(450.0, 120.0));
        assert!(goal.contains_ball(pos, BALL_RADIUS));
    }

    #[test]
    fn test_net_lines() {
        let goal = GoalRect::default();
        let (rows, cols) = goal.net_lines(5);
        assert_eq!(rows, vec![92.0, 104.0, 116.0, 128.0]);
        assert_eq!(cols, vec![340.0, 380.0, 420.0, 460.0]);
    }
}
