//! Collision detection and response for walls and paddles
//!
//! The tricky part of Pong at speed: a ball moving several pixels per tick
//! can skip straight past a 15 px paddle. Paddle checks therefore look one
//! tick ahead and allow a small buffer on the approach axis.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::*;
use crate::tuning::Tuning;

/// What the ball touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Ball bounced off the top or bottom wall
    pub wall_hit: bool,
    /// Ball bounced off a paddle
    pub paddle_hit: Option<Side>,
}

/// Resolve wall then paddle collisions for a ball already moved to its
/// tentative position. `look_ahead` is where it would be one tick later.
///
/// Walls go first and paddles see the wall-corrected Y, so a corner hit can
/// reflect both axes in one tick.
pub fn resolve_collisions(
    ball: &mut Ball,
    look_ahead: Vec2,
    left: &Paddle,
    right: &Paddle,
    tuning: &Tuning,
) -> CollisionResult {
    let wall_hit = resolve_walls(ball);

    let mut paddle_hit = None;
    for (side, paddle) in [(Side::Left, left), (Side::Right, right)] {
        if will_hit_paddle(side, ball, look_ahead, paddle) {
            bounce_off_paddle(side, ball, paddle, tuning);
            paddle_hit = Some(side);
        }
    }

    CollisionResult {
        wall_hit,
        paddle_hit,
    }
}

/// Reflect off the top/bottom wall and clamp onto it. Returns true on a hit.
pub fn resolve_walls(ball: &mut Ball) -> bool {
    if ball.pos.y <= 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = 0.0;
        true
    } else if ball.pos.y + BALL_SIZE >= ARENA_H {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ARENA_H - BALL_SIZE;
        true
    } else {
        false
    }
}

/// Predictive paddle test using the current and look-ahead positions
pub fn will_hit_paddle(side: Side, ball: &Ball, look_ahead: Vec2, paddle: &Paddle) -> bool {
    let vertical = paddle.overlaps_y(ball.pos.y) || paddle.overlaps_y(look_ahead.y);

    match side {
        Side::Left => {
            let face = paddle.x + PADDLE_W;
            ball.vel.x < 0.0
                && (ball.pos.x - COLLISION_BUFFER <= face
                    || look_ahead.x - COLLISION_BUFFER <= face)
                && ball.pos.x + BALL_SIZE >= paddle.x
                && vertical
        }
        Side::Right => {
            let face = paddle.x;
            ball.vel.x > 0.0
                && (ball.pos.x + BALL_SIZE + COLLISION_BUFFER >= face
                    || look_ahead.x + BALL_SIZE + COLLISION_BUFFER >= face)
                && ball.pos.x <= paddle.x + PADDLE_W
                && vertical
        }
    }
}

/// Offset of the ball's center from the paddle's center, in `[-1, 1]`.
/// Negative is above center.
pub fn relative_intersect(ball: &Ball, paddle: &Paddle) -> f32 {
    ((ball.center_y() - paddle.center_y()) / (PADDLE_H / 2.0)).clamp(-1.0, 1.0)
}

/// Send the ball back toward the opponent, steeper the farther from center
/// it struck, and snap it flush against the paddle face.
pub fn bounce_off_paddle(side: Side, ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) {
    let speed_x = ball.vel.x.abs() * BOUNCE_SPEEDUP;
    ball.vel.y = tuning.max_deflection_speed() * relative_intersect(ball, paddle);

    match side {
        Side::Left => {
            ball.vel.x = speed_x;
            ball.pos.x = paddle.x + PADDLE_W;
        }
        Side::Right => {
            ball.vel.x = -speed_x;
            ball.pos.x = paddle.x - BALL_SIZE;
        }
    }

    ball.cap_speed(tuning.max_ball_speed);
}
