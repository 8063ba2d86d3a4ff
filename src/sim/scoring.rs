//! Scoring and win detection
//!
//! A crossing is counted only while the gate is open. Scoring latches the
//! gate with a tick countdown; the re-serve and the gate release happen in
//! the same tick, so no crossing can be counted twice however long the
//! reset takes to land.

use super::rng::RandomSource;
use super::state::{Ball, GameEvent, MatchPhase, MatchState, ScoringGate, Side, StuckTracker};
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of the end-of-tick scoring check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Ball still in play (or gate latched)
    InPlay,
    /// A point was scored; the ball will be re-served
    Point { side: Side, new_score: u32 },
    /// A point was scored and it decided the match
    Win { side: Side, new_score: u32 },
}

/// Side that scores if the ball is past a goal line
pub fn crossing_scorer(ball: &Ball) -> Option<Side> {
    if ball.pos.x <= 0.0 {
        Some(Side::Right)
    } else if ball.pos.x + BALL_SIZE >= ARENA_W {
        Some(Side::Left)
    } else {
        None
    }
}

/// Award a point for a goal-line crossing, at most once per crossing
pub fn check_scoring(
    state: &mut MatchState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> ScoreOutcome {
    if !state.gate.is_open() {
        return ScoreOutcome::InPlay;
    }
    let Some(side) = crossing_scorer(&state.ball) else {
        return ScoreOutcome::InPlay;
    };

    let paddle = state.paddle_mut(side);
    paddle.score += 1;
    let new_score = paddle.score;

    // Parked at center until the re-serve lands
    state.ball = Ball::centered();
    events.push(GameEvent::Score { side, new_score });

    if new_score >= WINNING_SCORE {
        state.gate = ScoringGate::Locked;
        state.phase = MatchPhase::GameOver { winner: side };
        events.push(GameEvent::GameOver { winner: side });
        ScoreOutcome::Win { side, new_score }
    } else {
        state.gate = ScoringGate::Latched {
            ticks_until_reset: tuning.effective_reset_delay(),
        };
        ScoreOutcome::Point { side, new_score }
    }
}

/// Count down a latched gate. When the countdown expires the ball is
/// re-served and the gate reopens in the same tick. Returns true while the
/// ball is held (the caller must not move it this tick).
pub fn tick_pending_reset(
    state: &mut MatchState,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    match state.gate {
        ScoringGate::Open => false,
        ScoringGate::Locked => true,
        ScoringGate::Latched { ticks_until_reset } => {
            let remaining = ticks_until_reset.saturating_sub(1);
            if remaining == 0 {
                state.ball = Ball::served(tuning, rng);
                state.stuck = StuckTracker::default();
                state.gate = ScoringGate::Open;
                events.push(GameEvent::BallReset);
                log::debug!("Ball re-served with velocity {:?}", state.ball.vel);
            } else {
                state.gate = ScoringGate::Latched {
                    ticks_until_reset: remaining,
                };
            }
            true
        }
    }
}
