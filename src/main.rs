//! Astro Dodge entry point
//!
//! Headless build: the autopilot flies one run, frames are printed as text,
//! and the result is saved to a JSON run log next to the working directory.
//!
//! Usage: `astro-dodge [seed]`

use std::io;
use std::path::Path;
use std::time::Duration;

use astro_dodge::Tuning;
use astro_dodge::consts::FRAME_RATE;
use astro_dodge::persistence::{JsonFileStore, PersistenceWorker, now_ms};
use astro_dodge::render::TextRenderer;
use astro_dodge::session::{CancelToken, RunExit, Session};
use astro_dodge::sim::{Autopilot, FramePacer, GameState};

const TUNING_FILE: &str = "astro_dodge.json";
const RUNS_FILE: &str = "astro_dodge_runs.json";
/// Ten minutes of play at most
const MAX_FRAMES: u64 = 60 * 60 * 10;
const SYNC_TIMEOUT: Duration = Duration::from_secs(3);

fn main() {
    env_logger::init();
    log::info!("Astro Dodge (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| match arg.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed '{}': {}", arg, e);
                None
            }
        })
        .unwrap_or_else(now_ms);
    log::info!("Seed {}", seed);

    let tuning = Tuning::load(Path::new(TUNING_FILE));

    let worker = match PersistenceWorker::spawn(JsonFileStore::new(RUNS_FILE)) {
        Ok(worker) => Some(worker),
        Err(e) => {
            log::warn!("Run history disabled: {}", e);
            None
        }
    };

    let renderer = TextRenderer::new(io::stdout(), 80, 25).with_interval(FRAME_RATE as u64);
    let mut session = Session::new(GameState::new(tuning, seed), renderer, worker);
    session.wait_for_sync(SYNC_TIMEOUT);

    println!("{}", session.briefing());
    session.frame();
    session.start();

    let cancel = CancelToken::new();
    let mut pacer = FramePacer::new(FRAME_RATE);
    let exit = session.run(&cancel, &mut pacer, Some(&Autopilot), Some(MAX_FRAMES));

    match exit {
        RunExit::Finished(run) => {
            println!("Final score {} ({} dodged)", run.score, run.obstacles_dodged);
        }
        other => log::info!("Run stopped early: {:?}", other),
    }

    session.wait_for_sync(SYNC_TIMEOUT);
    if let Some(debrief) = session.debrief() {
        println!("{}", debrief);
    }

    let board = &session.scoreboard;
    println!("History [{}]  all-time high {}", board.status.as_str(), board.all_time_high);
    if board.is_empty() {
        println!("  (no runs stored)");
    }
    for record in &board.recent_history {
        let marker = if record.is_new_high { " *" } else { "" };
        println!(
            "  ID {}  {:>7}  dodged {:>4}{}",
            record.short_id(),
            record.score,
            record.obstacles_dodged,
            marker
        );
    }
}
