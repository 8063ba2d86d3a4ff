//! Pong Engine - deterministic two-paddle ball game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, scoring)
//! - `controller`: Fixed-rate tick loop and event dispatch
//! - `input`: Held-key snapshot to per-tick input mapping
//! - `replay`: Recorded input streams for deterministic re-simulation
//! - `settings`: Runtime configuration
//! - `tuning`: Data-driven game balance

pub mod controller;
pub mod input;
pub mod replay;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use controller::{EventSink, LogSink, MatchController};
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_W: f32 = 800.0;
    pub const ARENA_H: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_W: f32 = 15.0;
    pub const PADDLE_H: f32 = 100.0;
    /// Distance from the side wall to the paddle's outer face
    pub const PADDLE_INSET: f32 = 50.0;
    /// Pixels per tick while a key is held
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults (square ball, side length)
    pub const BALL_SIZE: f32 = 15.0;
    /// Slowest allowed serve speed (pixels per tick)
    pub const MIN_INITIAL_BALL_SPEED: f32 = 3.125;
    /// Fastest allowed serve speed (pixels per tick)
    pub const MAX_INITIAL_BALL_SPEED: f32 = 5.0;
    /// Default cap on ball speed magnitude (pixels per tick)
    pub const DEFAULT_MAX_BALL_SPEED: f32 = 16.0;

    /// Horizontal speed boost when ball hits paddle (multiplicative)
    pub const BOUNCE_SPEEDUP: f32 = 1.05;
    /// Scales the paddle-relative intersection into vertical speed
    pub const PADDLE_ANGLE_FACTOR: f32 = 1.5;
    /// Approach-axis tolerance for paddle hits
    pub const COLLISION_BUFFER: f32 = 5.0;

    /// Stuck-ball watchdog
    pub const STUCK_THRESHOLD: f32 = 1.0;
    pub const STUCK_FRAME_LIMIT: u32 = 10;
    pub const STUCK_ESCAPE_BOOST: f32 = 1.5;

    /// First side to reach this wins the match
    pub const WINNING_SCORE: u32 = 7;
}

/// Top-left corner that places the ball in the middle of the arena
#[inline]
pub fn ball_center_position() -> glam::Vec2 {
    use consts::*;
    glam::Vec2::new(ARENA_W / 2.0 - BALL_SIZE / 2.0, ARENA_H / 2.0 - BALL_SIZE / 2.0)
}

/// Clamp a paddle's top edge into the arena
#[inline]
pub fn clamp_paddle_y(y: f32) -> f32 {
    y.clamp(0.0, consts::ARENA_H - consts::PADDLE_H)
}
