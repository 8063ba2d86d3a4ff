//! Injectable randomness
//!
//! The simulation never touches a global RNG. Production code seeds a
//! `Pcg32`; tests script the exact values they need.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_float(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_float(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator used by the controller and replays
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of values, wrapping around at the end
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        debug_assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_float(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
