//! Match controller
//!
//! Owns the one mutable [`MatchState`], runs fixed simulation steps from a
//! variable frame clock, and hands every emitted event to an [`EventSink`]
//! (audio, HUD, logging). The engine never calls out on its own.

use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, MatchState, RandomSource, TickInput, seeded_rng};
use crate::tuning::Tuning;

/// Consumer of simulation events
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent, state: &MatchState);
}

/// Collects events, mostly for tests and replays
impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent, _state: &MatchState) {
        self.push(*event);
    }
}

/// Forwards only when present
impl<S: EventSink> EventSink for Option<S> {
    fn on_event(&mut self, event: &GameEvent, state: &MatchState) {
        if let Some(sink) = self {
            sink.on_event(event, state);
        }
    }
}

/// Writes each event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: &GameEvent, state: &MatchState) {
        match event {
            GameEvent::WallHit => log::trace!("tick {}: wall hit", state.tick),
            GameEvent::PaddleHit { side } => {
                log::debug!("tick {}: {} paddle hit", state.tick, side.label())
            }
            GameEvent::Score { side, new_score } => log::info!(
                "tick {}: {} scores ({}) - {}:{}",
                state.tick,
                side.label(),
                new_score,
                state.left.score,
                state.right.score
            ),
            GameEvent::GameOver { winner } => {
                log::info!("tick {}: game over, {} wins", state.tick, winner.label())
            }
            GameEvent::BallReset => log::debug!("tick {}: ball re-served", state.tick),
        }
    }
}

/// Fixed-rate driver around [`sim::advance`]
#[derive(Debug, Clone)]
pub struct MatchController<R = Pcg32> {
    state: MatchState,
    tuning: Tuning,
    rng: R,
    accumulator: f32,
    max_substeps: u32,
    /// One-shot actions waiting for the next substep
    pending: TickInput,
    /// Inputs fed to each tick while recording
    recording: Option<Vec<TickInput>>,
}

impl MatchController<Pcg32> {
    /// Controller seeded from settings. Returns the seed actually used.
    pub fn from_settings(settings: &Settings) -> (Self, u64) {
        let seed = settings.resolve_seed();
        let mut controller = Self::new(settings.tuning, seeded_rng(seed));
        controller.max_substeps = settings.max_substeps.max(1);
        log::info!("Match controller initialized with seed: {}", seed);
        (controller, seed)
    }
}

impl<R: RandomSource> MatchController<R> {
    pub fn new(tuning: Tuning, rng: R) -> Self {
        Self {
            state: MatchState::new(),
            tuning,
            rng,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
            pending: TickInput::default(),
            recording: None,
        }
    }

    /// Current state for rendering
    pub fn snapshot(&self) -> &MatchState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Queue the start action for the next tick
    pub fn start(&mut self) {
        self.pending.start_pressed = true;
    }

    /// Queue the reset action for the next tick
    pub fn reset(&mut self) {
        self.pending.reset_pressed = true;
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self, input: TickInput, sink: &mut impl EventSink) -> &MatchState {
        let input = TickInput {
            start_pressed: input.start_pressed || self.pending.start_pressed,
            reset_pressed: input.reset_pressed || self.pending.reset_pressed,
            ..input
        };
        self.pending = TickInput::default();

        if let Some(recording) = self.recording.as_mut() {
            recording.push(input);
        }

        let step = sim::advance(&self.state, &input, &self.tuning, &mut self.rng);
        if step.state.phase != self.state.phase {
            log::info!("Phase {:?} -> {:?}", self.state.phase, step.state.phase);
        }
        self.state = step.state;
        for event in &step.events {
            sink.on_event(event, &self.state);
        }
        &self.state
    }

    /// Feed a frame's elapsed time and run as many fixed steps as fit.
    /// One-shot actions in `input` are applied by the first step only.
    /// Returns the number of steps run.
    pub fn update(&mut self, frame_dt: f32, input: TickInput, sink: &mut impl EventSink) -> u32 {
        self.pending.start_pressed |= input.start_pressed;
        self.pending.reset_pressed |= input.reset_pressed;
        let held = input.held_only();

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.step(held, sink);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop time we could not catch up on
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Start capturing every tick's input
    pub fn start_recording(&mut self) {
        self.recording = Some(Vec::new());
    }

    /// Stop capturing and return what was recorded
    pub fn take_recording(&mut self) -> Vec<TickInput> {
        self.recording.take().unwrap_or_default()
    }
}
