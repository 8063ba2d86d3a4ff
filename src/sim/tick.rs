//! Fixed timestep simulation tick
//!
//! `advance` is a pure function of (state, input, tuning, rng): it never
//! keeps anything between calls, so a match can be replayed from its
//! starting state and input stream.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::rng::RandomSource;
use super::scoring::{ScoreOutcome, check_scoring, tick_pending_reset};
use super::state::{Ball, GameEvent, MatchPhase, MatchState, ScoringGate, StuckTracker};
use super::watchdog::check_stuck_ball;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Start the match (only honoured in `Start`)
    pub start_pressed: bool,
    /// Return to `Start` from any phase
    pub reset_pressed: bool,
}

impl TickInput {
    /// Copy without the one-shot control actions
    pub fn held_only(&self) -> Self {
        Self {
            start_pressed: false,
            reset_pressed: false,
            ..*self
        }
    }
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: MatchState,
    pub events: Vec<GameEvent>,
}

/// Advance the match by one fixed timestep
pub fn advance(
    state: &MatchState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Step {
    let mut next = *state;
    let mut events = Vec::new();
    tick(&mut next, input, tuning, rng, &mut events);
    Step {
        state: next,
        events,
    }
}

fn tick(
    state: &mut MatchState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    // Control actions consume the tick
    if input.reset_pressed {
        *state = reset(state);
        return;
    }
    if input.start_pressed && state.phase == MatchPhase::Start {
        *state = start(state, tuning, rng);
        return;
    }

    // Idle outside of play
    if state.phase != MatchPhase::Playing {
        return;
    }

    state.tick += 1;

    // Paddles move independently, ball collisions see the new positions
    state.left.apply_input(input.left_up, input.left_down);
    state.right.apply_input(input.right_up, input.right_down);

    // Ball is parked while a point's re-serve is pending
    if tick_pending_reset(state, tuning, rng, events) {
        return;
    }

    let pre_tick = state.ball.pos;
    state.ball.pos += state.ball.vel;
    // Prediction only, never committed
    let look_ahead = state.ball.pos + state.ball.vel;

    check_stuck_ball(&mut state.stuck, pre_tick, &mut state.ball.vel, tuning, rng);

    let result = resolve_collisions(&mut state.ball, look_ahead, &state.left, &state.right, tuning);
    if result.wall_hit {
        events.push(GameEvent::WallHit);
    }
    if let Some(side) = result.paddle_hit {
        events.push(GameEvent::PaddleHit { side });
    }

    match check_scoring(state, tuning, events) {
        ScoreOutcome::InPlay => {}
        ScoreOutcome::Point { side, new_score } => {
            log::debug!("Tick {}: {} scored ({})", state.tick, side.label(), new_score);
        }
        ScoreOutcome::Win { side, .. } => {
            log::info!(
                "Tick {}: {} wins {}-{}, match over",
                state.tick,
                side.label(),
                state.left.score,
                state.right.score
            );
        }
    }
}

/// `Start -> Playing` with a freshly served ball. No-op in other phases.
pub fn start(state: &MatchState, tuning: &Tuning, rng: &mut impl RandomSource) -> MatchState {
    if state.phase != MatchPhase::Start {
        return *state;
    }
    let next = MatchState {
        phase: MatchPhase::Playing,
        ball: Ball::served(tuning, rng),
        stuck: StuckTracker::default(),
        gate: ScoringGate::Open,
        ..*state
    };
    log::info!("Match started, serve velocity {:?}", next.ball.vel);
    next
}

/// Any phase -> `Start`, scores zeroed, everything centered and still
pub fn reset(state: &MatchState) -> MatchState {
    log::info!(
        "Match reset from {:?} at {}-{}",
        state.phase,
        state.left.score,
        state.right.score
    );
    MatchState::new()
}
