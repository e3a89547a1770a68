use glam::Vec2;
use proptest::prelude::*;

use penalty_shootout::clamp_magnitude;
use penalty_shootout::consts::BALL_START;
use penalty_shootout::sim::{
    Ball, GameInput, GameSession, GoalRect, ShotPhase, StepOutcome, apply, step_ball,
};
use penalty_shootout::Tuning;

/// Upper bound on steps for a launch speed under 300 to settle
const SETTLE_BOUND: u32 = 1_000;

proptest! {
    /// Any moving ball comes to rest within a bounded number of steps
    #[test]
    fn prop_step_converges(
        vx in -200.0f32..200.0f32,
        vy in -200.0f32..200.0f32,
    ) {
        prop_assume!(vx != 0.0 || vy != 0.0);
        let mut ball = Ball { vel: Vec2::new(vx, vy), moving: true, ..Default::default() };
        let goal = GoalRect::default();
        let tuning = Tuning::default();

        let mut steps = 0;
        while ball.moving {
            step_ball(&mut ball, &goal, &tuning);
            steps += 1;
            prop_assert!(steps <= SETTLE_BOUND);
        }
        prop_assert_eq!(ball.vel, Vec2::ZERO);
    }

    /// A captured ball is pinned against the back of the goal
    #[test]
    fn prop_capture_pins_ball(
        vx in -30.0f32..30.0f32,
        vy in -60.0f32..-1.0f32,
    ) {
        let mut ball = Ball { vel: Vec2::new(vx, vy), moving: true, ..Default::default() };
        let goal = GoalRect::default();
        let tuning = Tuning::default();

        let mut outcome = StepOutcome::Rolling;
        while outcome == StepOutcome::Rolling {
            outcome = step_ball(&mut ball, &goal, &tuning);
        }
        if outcome == StepOutcome::Captured {
            prop_assert!(!ball.moving);
            prop_assert_eq!(ball.pos.y, goal.bottom() - ball.radius - tuning.capture_gap);
        }
    }

    /// A release that is not clearly upward never starts a shot
    #[test]
    fn prop_shallow_drag_stays_in_aim(
        dx in -300.0f32..300.0f32,
        dy in -10.0f32..200.0f32,
    ) {
        let mut session = GameSession::default();
        let release = BALL_START + Vec2::new(dx, dy);
        apply(&mut session, &GameInput::PointerDown(BALL_START));
        apply(&mut session, &GameInput::PointerMove(release));
        apply(&mut session, &GameInput::PointerUp(release));
        apply(&mut session, &GameInput::Frame);

        prop_assert_eq!(session.phase, ShotPhase::Aim);
        prop_assert!(!session.ball.moving);
        prop_assert_eq!(session.shots_taken, 0);
    }

    /// Every launched shot settles exactly once
    #[test]
    fn prop_each_round_counts_once(
        releases in prop::collection::vec((-300.0f32..300.0f32, -330.0f32..-11.0f32), 1..8),
    ) {
        let mut session = GameSession::default();
        for (round, (dx, dy)) in releases.iter().enumerate() {
            if round > 0 {
                apply(&mut session, &GameInput::PointerDown(Vec2::ZERO));
            }
            let release = BALL_START + Vec2::new(*dx, *dy);
            apply(&mut session, &GameInput::PointerDown(BALL_START));
            apply(&mut session, &GameInput::PointerMove(release));
            apply(&mut session, &GameInput::PointerUp(release));
            session.run_until_settled(SETTLE_BOUND);
            prop_assert!(session.phase.is_round_over());
        }
        prop_assert_eq!(session.shots_taken, releases.len() as u32);
        prop_assert!(session.score <= session.shots_taken);
    }

    /// Clamping never lengthens a vector and respects the limit
    #[test]
    fn prop_clamp_magnitude(
        x in -500.0f32..500.0f32,
        y in -500.0f32..500.0f32,
        max in 0.0f32..300.0f32,
    ) {
        let v = Vec2::new(x, y);
        let clamped = clamp_magnitude(v, max);
        prop_assert!(clamped.length() <= v.length() + 1e-3);
        prop_assert!(clamped.length() <= max + 1e-3);
    }
}
