//! Pong headless runner
//!
//! Runs a match without a renderer: either replays a recorded input stream
//! or serves a demo match with idle paddles, then prints the final state as
//! JSON. Rendering, audio and keyboard wiring belong to the host.
//!
//! Usage: `pong [--settings PATH] [--replay PATH] [--record PATH] [--max-ticks N]`

use std::path::PathBuf;
use std::process::ExitCode;

use pong_engine::consts::SIM_DT;
use pong_engine::replay::Replay;
use pong_engine::sim::{MatchPhase, MatchState, TickInput};
use pong_engine::{LogSink, MatchController, Settings};

/// Ten minutes at 60 Hz
const DEFAULT_MAX_TICKS: u64 = 36_000;

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    replay: Option<PathBuf>,
    record: Option<PathBuf>,
    max_ticks: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{} needs a value", flag));
        match flag.as_str() {
            "--settings" => args.settings = Some(PathBuf::from(value()?)),
            "--replay" => args.replay = Some(PathBuf::from(value()?)),
            "--record" => args.record = Some(PathBuf::from(value()?)),
            "--max-ticks" => {
                let raw = value()?;
                let ticks = raw
                    .parse()
                    .map_err(|_| format!("invalid --max-ticks '{}'", raw))?;
                args.max_ticks = Some(ticks);
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

/// Serve a match and let it play out with idle paddles
fn run_demo(settings: &Settings, args: &Args) -> Result<MatchState, String> {
    let (mut controller, seed) = MatchController::from_settings(settings);
    let mut sink = settings.log_events.then_some(LogSink);
    let max_ticks = args.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);

    if args.record.is_some() {
        controller.start_recording();
    }
    controller.start();

    let mut ticks = 0;
    while ticks < max_ticks {
        ticks += u64::from(controller.update(SIM_DT, TickInput::default(), &mut sink));
        if matches!(controller.snapshot().phase, MatchPhase::GameOver { .. }) {
            break;
        }
    }
    log::info!("Demo finished after {} ticks", ticks);

    if let Some(path) = &args.record {
        let replay = Replay::record(seed, *controller.tuning(), controller.take_recording());
        replay.save(path).map_err(|e| e.to_string())?;
    }
    Ok(*controller.snapshot())
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let settings = Settings::load_or_default(args.settings.as_deref()).map_err(|e| e.to_string())?;

    let final_state = match &args.replay {
        Some(path) => {
            let replay = Replay::load(path).map_err(|e| e.to_string())?;
            let mut sink = settings.log_events.then_some(LogSink);
            replay.run_with(&mut sink)
        }
        None => run_demo(&settings, &args)?,
    };

    match final_state.winner() {
        Some(winner) => log::info!(
            "{} Wins! Final score {} : {}",
            winner.label(),
            final_state.left.score,
            final_state.right.score
        ),
        None => log::info!(
            "No winner yet, score {} : {}",
            final_state.left.score,
            final_state.right.score
        ),
    }

    let json = serde_json::to_string_pretty(&final_state).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pong (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
