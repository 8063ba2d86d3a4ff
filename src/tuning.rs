//! Data-driven game balance
//!
//! Values here may differ between matches; geometry lives in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-match tuning knobs read by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Serve speed on each axis (pixels per tick)
    pub initial_ball_speed: f32,
    /// Ceiling on the ball's speed magnitude (pixels per tick)
    pub max_ball_speed: f32,
    /// Ticks between a point being scored and the ball being re-served
    pub reset_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_ball_speed: MIN_INITIAL_BALL_SPEED,
            max_ball_speed: DEFAULT_MAX_BALL_SPEED,
            reset_delay_ticks: 1,
        }
    }
}

impl Tuning {
    /// Vertical speed produced by a hit on the very tip of a paddle
    pub fn max_deflection_speed(&self) -> f32 {
        self.initial_ball_speed * PADDLE_ANGLE_FACTOR
    }

    /// Smallest speed cap that still fits the steepest serve and the
    /// steepest paddle deflection at serve speed
    pub fn min_speed_cap(&self) -> f32 {
        self.initial_ball_speed * PADDLE_ANGLE_FACTOR.hypot(1.0)
    }

    /// Reset delay with the one-tick floor applied
    pub fn effective_reset_delay(&self) -> u32 {
        self.reset_delay_ticks.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_balance() {
        let tuning = Tuning::default();
        assert_eq!(tuning.initial_ball_speed, 3.125);
        assert_eq!(tuning.reset_delay_ticks, 1);
        assert!((tuning.max_deflection_speed() - 4.6875).abs() < 1e-6);
        assert!(tuning.max_ball_speed >= tuning.min_speed_cap());
    }

    #[test]
    fn test_min_speed_cap_covers_serve_and_deflection() {
        let tuning = Tuning {
            initial_ball_speed: 4.0,
            ..Default::default()
        };
        let serve = 4.0 * std::f32::consts::SQRT_2;
        let deflection = (4.0f32).hypot(tuning.max_deflection_speed());
        assert!(tuning.min_speed_cap() >= serve);
        assert!((tuning.min_speed_cap() - deflection).abs() < 1e-5);
    }

    #[test]
    fn test_zero_reset_delay_floors_to_one() {
        let tuning = Tuning {
            reset_delay_ticks: 0,
            ..Default::default()
        };
        assert_eq!(tuning.effective_reset_delay(), 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"initial_ball_speed": 4.0}"#).unwrap();
        assert_eq!(tuning.initial_ball_speed, 4.0);
        assert_eq!(tuning.max_ball_speed, DEFAULT_MAX_BALL_SPEED);
    }
}
