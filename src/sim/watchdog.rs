//! Stuck-ball watchdog
//!
//! A heuristic safety valve: if the ball barely moves for more than
//! `STUCK_FRAME_LIMIT` consecutive ticks, kick it loose.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{StuckTracker, cap_velocity};
use crate::consts::*;
use crate::tuning::Tuning;

/// Update the tracker with this tick's starting position and nudge `vel`
/// if the ball has been stationary too long. Returns true when nudged.
pub fn check_stuck_ball(
    tracker: &mut StuckTracker,
    pre_tick_pos: Vec2,
    vel: &mut Vec2,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> bool {
    let delta = (pre_tick_pos - tracker.last).abs();
    let mut nudged = false;

    if delta.x < STUCK_THRESHOLD && delta.y < STUCK_THRESHOLD {
        tracker.stuck_frames += 1;

        if tracker.stuck_frames > STUCK_FRAME_LIMIT {
            let speed = tuning.initial_ball_speed;
            // A zero X component would survive any multiplier
            if vel.x == 0.0 {
                vel.x = if rng.next_float() > 0.5 { speed } else { -speed };
            }
            vel.x *= STUCK_ESCAPE_BOOST;
            vel.y = speed * (rng.next_float() * 2.0 - 1.0);
            *vel = cap_velocity(*vel, tuning.max_ball_speed);
            tracker.stuck_frames = 0;
            nudged = true;
            log::debug!("Stuck ball nudged at {:?}, new velocity {:?}", pre_tick_pos, vel);
        }
    } else {
        tracker.stuck_frames = 0;
    }

    tracker.last = pre_tick_pos;
    nudged
}
