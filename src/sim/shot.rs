//! Drag-to-shoot input protocol
//!
//! Pointer coordinates arrive already mapped into field units. Direction and
//! power are measured from the ball's position to the release point, not
//! from where the drag started.

use glam::Vec2;

use super::state::{
    GameSession, MSG_DRAG_UP, MSG_SHOOTING, RoundEvent, ShotGesture, ShotPhase, ShotRejection,
};
use crate::{clamp_magnitude, distance, magnitude};

/// Pointer pressed
pub fn pointer_down(session: &mut GameSession, at: Vec2) -> Option<RoundEvent> {
    match session.phase {
        ShotPhase::Aim => {
            session.started = true;
            let grab_radius = session.ball.radius + session.tuning.grab_slack;
            if distance(at, session.ball.pos) < grab_radius {
                session.gesture = ShotGesture::begin(at);
                Some(RoundEvent::GestureStarted { at })
            } else {
                None
            }
        }
        ShotPhase::Scored | ShotPhase::Missed => {
            session.reset_round();
            Some(RoundEvent::RoundReset)
        }
        ShotPhase::Shooting => None,
    }
}

/// Pointer moved
pub fn pointer_move(session: &mut GameSession, at: Vec2) {
    if session.gesture.is_active() {
        session.gesture.end = Some(at);
    }
}

/// Pointer released.
///
/// The shot is measured to the last point seen by down or move; the release
/// coordinate itself is not used.
pub fn pointer_up(session: &mut GameSession, _at: Vec2) -> Option<RoundEvent> {
    if session.phase != ShotPhase::Aim || !session.gesture.is_active() {
        return None;
    }

    let (Some(_start), Some(end)) = (session.gesture.start, session.gesture.end) else {
        return None;
    };
    session.gesture.clear();

    let drag = end - session.ball.pos;
    if drag.y >= -session.tuning.min_upward_drag {
        session.set_message(MSG_DRAG_UP);
        return Some(RoundEvent::ShotRejected(ShotRejection::NotUpward));
    }

    // The cap only limits the reported power; velocity follows the raw drag.
    let power = magnitude(clamp_magnitude(drag, session.tuning.power_cap));
    let velocity = drag * session.tuning.velocity_scale;

    session.ball.vel = velocity;
    session.ball.moving = true;
    session.phase = ShotPhase::Shooting;
    session.set_message(MSG_SHOOTING);

    Some(RoundEvent::ShotLaunched { velocity, power })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::MSG_AIM;

    #[test]
    fn test_down_near_ball_starts_gesture() {
        let mut session = GameSession::default();
        let event = pointer_down(&mut session, Vec2::new(420.0, 340.0));
        assert_eq!(
            event,
            Some(RoundEvent::GestureStarted {
                at: Vec2::new(420.0, 340.0)
            })
        );
        assert!(session.gesture.is_active());
        assert!(session.started);
    }

    #[test]
    fn test_down_far_from_ball_is_ignored() {
        let mut session = GameSession::default();
        // Exactly radius + slack away does not count
        assert_eq!(pointer_down(&mut session, Vec2::new(428.0, 330.0)), None);
        assert!(!session.gesture.is_active());
        assert!(session.started);
        assert_eq!(session.phase, ShotPhase::Aim);
    }

    #[test]
    fn test_move_without_gesture_does_nothing() {
        let mut session = GameSession::default();
        pointer_move(&mut session, Vec2::new(10.0, 10.0));
        assert_eq!(session.gesture, ShotGesture::default());
    }

    #[test]
    fn test_release_uses_ball_relative_drag() {
        let mut session = GameSession::default();
        // Start off-centre; only the release point matters
        pointer_down(&mut session, Vec2::new(410.0, 335.0));
        pointer_move(&mut session, Vec2::new(420.0, 250.0));
        let event = pointer_up(&mut session, Vec2::new(420.0, 250.0));

        let Some(RoundEvent::ShotLaunched { velocity, power }) = event else {
            panic!("expected launch, got {:?}", event);
        };
        assert!((velocity - Vec2::new(3.6, -14.4)).length() < 1e-4);
        assert!((power - Vec2::new(20.0, -80.0).length()).abs() < 1e-4);
        assert_eq!(session.phase, ShotPhase::Shooting);
        assert!(session.ball.moving);
        assert!(!session.gesture.is_active());
        assert_eq!(session.message, MSG_SHOOTING);
    }

    #[test]
    fn test_release_below_threshold_is_rejected() {
        let mut session = GameSession::default();
        pointer_down(&mut session, Vec2::new(400.0, 330.0));
        // drag.y == -10 is not strictly above the threshold
        pointer_move(&mut session, Vec2::new(400.0, 320.0));
        let event = pointer_up(&mut session, Vec2::new(400.0, 320.0));
        assert_eq!(
            event,
            Some(RoundEvent::ShotRejected(ShotRejection::NotUpward))
        );
        assert_eq!(session.phase, ShotPhase::Aim);
        assert!(!session.ball.moving);
        assert!(!session.gesture.is_active());
        assert_eq!(session.message, MSG_DRAG_UP);
    }

    #[test]
    fn test_release_without_move_measures_press_point() {
        let mut session = GameSession::default();
        pointer_down(&mut session, Vec2::new(400.0, 330.0));
        // No move: the gesture still ends where it started
        let event = pointer_up(&mut session, Vec2::new(420.0, 250.0));
        assert_eq!(
            event,
            Some(RoundEvent::ShotRejected(ShotRejection::NotUpward))
        );
        assert_eq!(session.phase, ShotPhase::Aim);
        assert!(!session.ball.moving);
        assert_eq!(session.message, MSG_DRAG_UP);
    }

    #[test]
    fn test_power_cap_does_not_scale_velocity() {
        let mut session = GameSession::default();
        pointer_down(&mut session, Vec2::new(400.0, 330.0));
        pointer_move(&mut session, Vec2::new(400.0, 30.0));
        let event = pointer_up(&mut session, Vec2::new(400.0, 30.0));

        let Some(RoundEvent::ShotLaunched { velocity, power }) = event else {
            panic!("expected launch, got {:?}", event);
        };
        assert!((power - 180.0).abs() < 1e-3);
        // 300 units of drag, not 180
        assert!((velocity.y - -54.0).abs() < 1e-3);
        assert!(velocity.length() > 180.0 * 0.18);
    }

    #[test]
    fn test_down_after_round_resets() {
        let mut session = GameSession::default();
        session.phase = ShotPhase::Missed;
        session.ball.pos = Vec2::new(100.0, 50.0);
        assert_eq!(
            pointer_down(&mut session, Vec2::new(0.0, 0.0)),
            Some(RoundEvent::RoundReset)
        );
        assert_eq!(session.phase, ShotPhase::Aim);
        assert_eq!(session.ball.pos, Vec2::new(400.0, 330.0));
        assert_eq!(session.message, MSG_AIM);
        // The reset press does not also begin a drag
        assert!(!session.gesture.is_active());
    }

    #[test]
    fn test_down_while_shooting_is_noop() {
        let mut session = GameSession::default();
        session.phase = ShotPhase::Shooting;
        session.ball.moving = true;
        let before = session.clone();
        assert_eq!(pointer_down(&mut session, before.ball.pos), None);
        assert_eq!(session.ball, before.ball);
        assert_eq!(session.phase, ShotPhase::Shooting);
        assert!(!session.gesture.is_active());
    }
}
