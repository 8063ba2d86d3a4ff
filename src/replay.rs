//! Deterministic replays
//!
//! A replay is the seed, the tuning and the per-tick input stream. Since
//! [`sim::advance`] is pure, feeding the same stream from a fresh match
//! reproduces every tick exactly.
//!
//! Stored as a versioned JSON envelope.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::EventSink;
use crate::sim::{self, GameEvent, MatchState, TickInput, seeded_rng};
use crate::tuning::Tuning;

/// Current envelope version
pub const REPLAY_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to access replay file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed replay JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported replay version {found} (expected {expected})", expected = REPLAY_VERSION)]
    UnsupportedVersion { found: u32 },
}

/// Recorded match input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub version: u32,
    pub seed: u64,
    pub tuning: Tuning,
    pub inputs: Vec<TickInput>,
}

/// Result of re-simulating a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub final_state: MatchState,
    pub events: Vec<GameEvent>,
}

impl Replay {
    pub fn record(seed: u64, tuning: Tuning, inputs: Vec<TickInput>) -> Self {
        Self {
            version: REPLAY_VERSION,
            seed,
            tuning,
            inputs,
        }
    }

    /// Re-simulate from a fresh match, forwarding events to `sink`
    pub fn run_with(&self, sink: &mut impl EventSink) -> MatchState {
        let mut rng = seeded_rng(self.seed);
        let mut state = MatchState::new();
        for input in &self.inputs {
            let step = sim::advance(&state, input, &self.tuning, &mut rng);
            state = step.state;
            for event in &step.events {
                sink.on_event(event, &state);
            }
        }
        state
    }

    /// Re-simulate and collect every event
    pub fn run(&self) -> ReplayOutcome {
        let mut events = Vec::new();
        let final_state = self.run_with(&mut events);
        ReplayOutcome {
            final_state,
            events,
        }
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let replay: Self = serde_json::from_str(json)?;
        if replay.version != REPLAY_VERSION {
            return Err(ReplayError::UnsupportedVersion {
                found: replay.version,
            });
        }
        Ok(replay)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let replay = Self::from_json(&json)?;
        log::info!(
            "Loaded replay from {} ({} ticks)",
            path.display(),
            replay.inputs.len()
        );
        Ok(replay)
    }

    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Replay saved to {}", path.display());
        Ok(())
    }
}
