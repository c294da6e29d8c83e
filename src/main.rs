//! Skipping Stone - headless demo
//!
//! Runs the bounce engine in real time with the idle player, restarting on
//! the wall-clock timer after each sunk disc, and prints a JSON summary of
//! every run.
//!
//! Usage: skipping-stone [--tuning FILE] [--runs N] [--seed N]

use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use skipping_stone::Tuning;
use skipping_stone::consts::SIM_DT;
use skipping_stone::sim::{FixedStep, IdlePlayer, Session, SplashPool, WallClockScheduler, tick};

/// Target display frame (60 Hz)
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// Give up on a run that outlives this many ticks (30 seconds at 120 Hz)
const MAX_RUN_TICKS: u64 = 120 * 30;
/// Idle player hit rate inside the window
const IDLE_ACCURACY: f64 = 0.85;

struct Options {
    tuning: Option<String>,
    runs: u32,
    seed: u64,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        tuning: None,
        runs: 3,
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {arg}"));
        match arg.as_str() {
            "--tuning" => options.tuning = Some(value()?),
            "--runs" => {
                options.runs = value()?
                    .parse()
                    .map_err(|e| format!("bad --runs: {e}"))?
            }
            "--seed" => {
                options.seed = value()?
                    .parse()
                    .map_err(|e| format!("bad --seed: {e}"))?
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: skipping-stone [--tuning FILE] [--runs N] [--seed N]");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Skipping Stone starting with seed: {}", options.seed);

    let mut session = Session::new(tuning);
    let mut splashes = SplashPool::from_tuning(&session.tuning);
    let mut restart = WallClockScheduler::new();
    let mut player = IdlePlayer::new(options.seed, IDLE_ACCURACY);
    let mut clock = FixedStep::default();
    let mut summaries = Vec::new();

    let mut last_frame = Instant::now();

    while (summaries.len() as u32) < options.runs {
        std::thread::sleep(FRAME_INTERVAL);
        let now = Instant::now();
        let frame_dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        // Splashes keep playing through the restart pause
        if !splashes.is_empty() {
            splashes.advance(frame_dt);
        }

        if session.is_alive() {
            for _ in 0..clock.steps(frame_dt, SIM_DT) {
                let input = player.input(&session);
                tick(&mut session, &input, SIM_DT, &mut splashes, &mut restart);
            }

            if session.is_alive() && session.time_ticks >= MAX_RUN_TICKS {
                log::info!("Run {} still skipping, stopping it", session.restarts + 1);
                summaries.push(session.summary());
                session.restart();
                splashes.clear();
                clock = FixedStep::default();
            }
            continue;
        }

        if !restart.is_pending() {
            // Death without a pending timer means scheduling failed
            log::warn!("No restart pending, restarting now");
            summaries.push(session.summary());
            session.restart();
            splashes.clear();
            clock = FixedStep::default();
            continue;
        }

        let Some(ticket) = restart.poll(now) else {
            continue;
        };
        if session.guard.pending_restart() != Some(ticket) {
            log::warn!("Ignoring restart {} not owned by this run", ticket.0);
            continue;
        }

        let summary = session.summary();
        log::info!(
            "Run {} over: {} bounces, {:.0} units",
            summary.run,
            summary.stats.bounces,
            summary.distance
        );
        summaries.push(summary);
        session.restart();
        splashes.clear();
        clock = FixedStep::default();
    }

    session.teardown(&mut restart);

    match serde_json::to_string_pretty(&summaries) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Summary serialization failed: {e}");
            ExitCode::FAILURE
        }
    }
}
