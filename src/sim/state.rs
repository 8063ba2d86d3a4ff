//! Match state and core simulation types
//!
//! Everything a tick needs lives in [`MatchState`], so a snapshot is enough
//! to replay or render the match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{ball_center_position, clamp_paddle_y};

/// Which end of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Name shown on the game-over overlay
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left Player",
            Side::Right => "Right Player",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the start action
    Start,
    /// Active gameplay
    Playing,
    /// A side reached the winning score; waiting for reset
    GameOver { winner: Side },
}

/// A player's paddle. `x` is the left edge, `y` the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub score: u32,
}

impl Paddle {
    /// Paddle at its starting position for the given side
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET,
            Side::Right => ARENA_W - PADDLE_INSET - PADDLE_W,
        };
        Self {
            x,
            y: ARENA_H / 2.0 - PADDLE_H / 2.0,
            score: 0,
        }
    }

    /// Apply one tick of held keys. Down wins when both are held.
    pub fn apply_input(&mut self, up: bool, down: bool) {
        let mut y = self.y;
        if up {
            y = self.y - PADDLE_SPEED;
        }
        if down {
            y = self.y + PADDLE_SPEED;
        }
        self.y = clamp_paddle_y(y);
        debug_assert!((0.0..=ARENA_H - PADDLE_H).contains(&self.y));
    }

    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_H / 2.0
    }

    /// Whether a ball whose top edge is at `ball_y` overlaps this paddle vertically
    pub fn overlaps_y(&self, ball_y: f32) -> bool {
        ball_y + BALL_SIZE >= self.y && ball_y <= self.y + PADDLE_H
    }
}

/// The ball. `pos` is the top-left corner of its square, `vel` in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Centered and motionless
    pub fn centered() -> Self {
        Self {
            pos: ball_center_position(),
            vel: Vec2::ZERO,
        }
    }

    /// Centered with a fresh random serve velocity
    pub fn served(tuning: &Tuning, rng: &mut impl RandomSource) -> Self {
        let vel = serve_velocity(tuning.initial_ball_speed, rng);
        Self {
            pos: ball_center_position(),
            vel: cap_velocity(vel, tuning.max_ball_speed),
        }
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + BALL_SIZE / 2.0
    }

    /// Clamp speed magnitude to the tuning ceiling
    pub fn cap_speed(&mut self, max_speed: f32) {
        self.vel = cap_velocity(self.vel, max_speed);
    }
}

/// Clamp `vel` to `max_speed`, giving up vertical speed before horizontal.
/// Horizontal speed never drops below `min(|vel.x|, max_speed)`.
pub fn cap_velocity(vel: Vec2, max_speed: f32) -> Vec2 {
    if vel.length_squared() <= max_speed * max_speed {
        return vel;
    }
    let x = vel.x.clamp(-max_speed, max_speed);
    let room = (max_speed * max_speed - x * x).max(0.0).sqrt();
    Vec2::new(x, vel.y.clamp(-room, room))
}

/// Serve velocity: full speed on X toward a random side, uniform on Y
pub fn serve_velocity(speed: f32, rng: &mut impl RandomSource) -> Vec2 {
    let vx = if rng.next_float() > 0.5 { speed } else { -speed };
    let vy = speed * (rng.next_float() * 2.0 - 1.0);
    Vec2::new(vx, vy)
}

/// Watchdog bookkeeping for the stuck-ball check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StuckTracker {
    /// Ball position at the start of the previous tick
    pub last: Vec2,
    /// Consecutive ticks with negligible movement
    pub stuck_frames: u32,
}

impl Default for StuckTracker {
    fn default() -> Self {
        Self {
            last: Vec2::new(ARENA_W / 2.0, ARENA_H / 2.0),
            stuck_frames: 0,
        }
    }
}

/// Latch that keeps a single boundary crossing from scoring twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringGate {
    /// Crossings are counted
    #[default]
    Open,
    /// A point was scored; the ball is re-served when the countdown hits zero
    Latched { ticks_until_reset: u32 },
    /// The match is decided; only a match reset reopens the gate
    Locked,
}

impl ScoringGate {
    pub fn is_open(&self) -> bool {
        matches!(self, ScoringGate::Open)
    }
}

/// Side effects of a tick, consumed by audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit { side: Side },
    Score { side: Side, new_score: u32 },
    GameOver { winner: Side },
    /// Ball re-served from center after a point
    BallReset,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Simulation ticks run while playing
    pub tick: u64,
    pub phase: MatchPhase,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub stuck: StuckTracker,
    pub gate: ScoringGate,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh match waiting for the start action
    pub fn new() -> Self {
        Self {
            tick: 0,
            phase: MatchPhase::Start,
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball: Ball::centered(),
            stuck: StuckTracker::default(),
            gate: ScoringGate::Open,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}
