//! Session transition function
//!
//! Every change to a `GameSession` goes through `apply`. The host feeds it
//! pointer input as it arrives and one `Frame` per fixed simulation step.

use glam::Vec2;

use super::shot::{pointer_down, pointer_move, pointer_up};
use super::state::{GameSession, MSG_GOAL, MSG_MISS, RoundEvent, ShotPhase};
use super::step::step_ball;
use crate::reward::REWARD_CODE;

/// Input to the session, in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInput {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
    /// One simulation step
    Frame,
}

/// Apply one input, returning the events it produced (often none)
pub fn apply(session: &mut GameSession, input: &GameInput) -> Vec<RoundEvent> {
    let events = match *input {
        GameInput::PointerDown(at) => pointer_down(session, at).into_iter().collect(),
        GameInput::PointerMove(at) => {
            pointer_move(session, at);
            Vec::new()
        }
        GameInput::PointerUp(at) => pointer_up(session, at).into_iter().collect(),
        GameInput::Frame => advance(session),
    };

    for event in &events {
        log::debug!("{:?} -> {:?}", input, event);
    }
    events
}

/// Advance the session by one simulation step.
///
/// Steps the ball while a shot is in flight, then settles the round exactly
/// once when the ball comes to rest.
pub fn advance(session: &mut GameSession) -> Vec<RoundEvent> {
    if session.phase != ShotPhase::Shooting {
        return Vec::new();
    }

    if session.ball.moving {
        step_ball(&mut session.ball, &session.goal, &session.tuning);
    }

    if session.ball.moving {
        return Vec::new();
    }

    settle_round(session)
}

/// Score a finished shot
fn settle_round(session: &mut GameSession) -> Vec<RoundEvent> {
    let mut events = Vec::with_capacity(2);
    session.shots_taken += 1;

    if session.ball_in_goal() {
        let was_unlocked = session.reward_unlocked();
        session.score += 1;
        session.phase = ShotPhase::Scored;
        session.set_message(MSG_GOAL);
        events.push(RoundEvent::GoalScored {
            score: session.score,
            shots_taken: session.shots_taken,
        });

        if !was_unlocked && session.reward_unlocked() {
            log::info!("Reward unlocked after {} goals", session.score);
            events.push(RoundEvent::RewardUnlocked { code: REWARD_CODE });
        }
    } else {
        session.phase = ShotPhase::Missed;
        session.set_message(MSG_MISS);
        events.push(RoundEvent::ShotMissed {
            shots_taken: session.shots_taken,
        });
    }

    events
}

impl GameSession {
    /// By-value form of `apply`, for reducer-style callers
    pub fn reduce(mut self, input: &GameInput) -> (Self, Vec<RoundEvent>) {
        let events = apply(&mut self, input);
        (self, events)
    }

    /// Step until the current shot settles, returning the settling events.
    ///
    /// Intended for headless drivers and tests; `max_steps` bounds the loop.
    pub fn run_until_settled(&mut self, max_steps: u32) -> Vec<RoundEvent> {
        for _ in 0..max_steps {
            if self.phase != ShotPhase::Shooting {
                break;
            }
            let events = apply(self, &GameInput::Frame);
            if !events.is_empty() {
                return events;
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ball;

    fn shoot(session: &mut GameSession, release: Vec2) -> Vec<RoundEvent> {
        let ball = session.ball.pos;
        apply(session, &GameInput::PointerDown(ball));
        apply(session, &GameInput::PointerMove(release));
        apply(session, &GameInput::PointerUp(release))
    }

    #[test]
    fn test_frame_outside_shooting_is_noop() {
        let mut session = GameSession::default();
        assert!(apply(&mut session, &GameInput::Frame).is_empty());
        assert_eq!(session.ball, Ball::default());
        assert_eq!(session.shots_taken, 0);
    }

    #[test]
    fn test_scoring_shot() {
        let mut session = GameSession::default();
        let launched = shoot(&mut session, Vec2::new(420.0, 250.0));
        assert!(matches!(launched.as_slice(), [RoundEvent::ShotLaunched { .. }]));

        let events = session.run_until_settled(1000);
        assert_eq!(
            events,
            vec![RoundEvent::GoalScored {
                score: 1,
                shots_taken: 1
            }]
        );
        assert_eq!(session.phase, ShotPhase::Scored);
        assert_eq!(session.message, MSG_GOAL);
        assert_eq!(session.ball.pos.y, 120.0);
    }

    #[test]
    fn test_wide_shot_misses() {
        let mut session = GameSession::default();
        shoot(&mut session, Vec2::new(200.0, 250.0));
        let events = session.run_until_settled(1000);
        assert_eq!(events, vec![RoundEvent::ShotMissed { shots_taken: 1 }]);
        assert_eq!(session.phase, ShotPhase::Missed);
        assert_eq!(session.score, 0);
        assert_eq!(session.message, MSG_MISS);
    }

    #[test]
    fn test_round_settles_once() {
        let mut session = GameSession::default();
        shoot(&mut session, Vec2::new(200.0, 250.0));
        session.run_until_settled(1000);
        for _ in 0..10 {
            assert!(apply(&mut session, &GameInput::Frame).is_empty());
        }
        assert_eq!(session.shots_taken, 1);
    }

    #[test]
    fn test_reward_event_fires_once() {
        let mut session = GameSession::default();
        let mut unlocks = 0;
        for round in 0..7 {
            if round > 0 {
                apply(&mut session, &GameInput::PointerDown(Vec2::ZERO));
            }
            shoot(&mut session, Vec2::new(420.0, 250.0));
            unlocks += session
                .run_until_settled(1000)
                .iter()
                .filter(|e| matches!(e, RoundEvent::RewardUnlocked { .. }))
                .count();
            assert_eq!(session.reward_unlocked(), round >= 4);
        }
        assert_eq!(unlocks, 1);
        assert_eq!(session.score, 7);
    }

    #[test]
    fn test_reduce_matches_apply() {
        let input = GameInput::PointerDown(Vec2::new(400.0, 330.0));
        let mut applied = GameSession::default();
        let events = apply(&mut applied, &input);
        let (reduced, reduced_events) = GameSession::default().reduce(&input);
        assert_eq!(events, reduced_events);
        assert_eq!(applied.gesture, reduced.gesture);
    }
}
