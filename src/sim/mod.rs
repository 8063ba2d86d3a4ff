//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Full state in, full state out (no hidden mutation between ticks)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rng;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod watchdog;

pub use collision::{CollisionResult, resolve_collisions};
pub use rng::{RandomSource, SequenceRandom, seeded_rng};
pub use scoring::{ScoreOutcome, check_scoring};
pub use state::{
    Ball, GameEvent, MatchPhase, MatchState, Paddle, ScoringGate, Side, StuckTracker,
};
pub use tick::{Step, TickInput, advance, reset, start};
pub use watchdog::check_stuck_ball;
