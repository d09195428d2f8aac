//! Frame loop
//!
//! A [`Session`] owns the game state and drives it one tick per frame:
//! sample input, tick, hand finished runs to the persistence worker, fold any
//! persistence responses into the scoreboard, then render a snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::{Scoreboard, SyncStatus};
use crate::input::InputState;
use crate::mission_log;
use crate::persistence::{PersistenceWorker, now_ms};
use crate::render::RenderAdapter;
use crate::sim::{Autopilot, FinalRun, FramePacer, GamePhase, GameState, TickInput, tick};

/// Shared flag that stops a running loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why [`Session::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// The craft was destroyed
    Finished(FinalRun),
    Cancelled,
    /// Frame limit hit while still playing
    FrameLimit,
    /// Called while not playing
    NotPlaying,
}

pub struct Session<R: RenderAdapter> {
    pub state: GameState,
    pub input: InputState,
    pub scoreboard: Scoreboard,
    renderer: R,
    persistence: Option<PersistenceWorker>,
    flavor_rng: Pcg32,
    briefing: &'static str,
    last_run: Option<FinalRun>,
}

impl<R: RenderAdapter> Session<R> {
    /// Build a session and ask the store for the current history
    pub fn new(state: GameState, renderer: R, persistence: Option<PersistenceWorker>) -> Self {
        let mut flavor_rng = Pcg32::seed_from_u64(now_ms());
        let briefing = mission_log::briefing(&mut flavor_rng);
        let mut session = Self {
            state,
            input: InputState::default(),
            scoreboard: Scoreboard::new(),
            renderer,
            persistence,
            flavor_rng,
            briefing,
            last_run: None,
        };
        session.request_summary();
        session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn briefing(&self) -> &'static str {
        self.briefing
    }

    /// Debrief for the last finished run
    pub fn debrief(&self) -> Option<&'static str> {
        self.last_run.map(|run| mission_log::debrief(run.score))
    }

    pub fn last_run(&self) -> Option<FinalRun> {
        self.last_run
    }

    /// Idle -> Playing
    pub fn start(&mut self) -> bool {
        self.state.start_run()
    }

    /// GameOver (or anything) -> Idle, with a fresh briefing
    pub fn return_to_idle(&mut self) {
        self.state.return_to_idle();
        self.input.clear();
        self.last_run = None;
        self.briefing = mission_log::briefing(&mut self.flavor_rng);
    }

    /// One frame using the live keyboard state
    pub fn frame(&mut self) -> Option<FinalRun> {
        let input = self.input.sample();
        self.frame_with(input)
    }

    /// One frame with explicit input
    pub fn frame_with(&mut self, input: TickInput) -> Option<FinalRun> {
        let ended = tick(&mut self.state, &input);
        if let Some(run) = ended {
            self.last_run = Some(run);
            self.submit(run);
        }
        self.pump_persistence();
        self.renderer.draw(&self.state.snapshot());
        ended
    }

    /// Play frames until the run ends, the token is cancelled, or
    /// `max_frames` frames have passed. The autopilot, when given, replaces
    /// keyboard input.
    pub fn run(
        &mut self,
        cancel: &CancelToken,
        pacer: &mut FramePacer,
        pilot: Option<&Autopilot>,
        max_frames: Option<u64>,
    ) -> RunExit {
        if self.state.phase != GamePhase::Playing {
            return RunExit::NotPlaying;
        }
        let mut frames = 0u64;
        loop {
            if cancel.is_cancelled() {
                log::info!("Loop cancelled after {} frames", frames);
                return RunExit::Cancelled;
            }
            if max_frames.is_some_and(|max| frames >= max) {
                return RunExit::FrameLimit;
            }
            let input = match pilot {
                Some(pilot) => pilot.steer(&self.state),
                None => self.input.sample(),
            };
            if let Some(run) = self.frame_with(input) {
                return RunExit::Finished(run);
            }
            frames += 1;
            pacer.wait();
        }
    }

    /// Block until no persistence request is outstanding, or `timeout`
    /// passes. Meant for shutdown, never called from the frame loop.
    pub fn wait_for_sync(&mut self, timeout: Duration) -> SyncStatus {
        let deadline = Instant::now() + timeout;
        while self.scoreboard.pending() > 0 {
            let Some(worker) = &self.persistence else {
                break;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log::warn!("Gave up waiting for the run store");
                break;
            }
            match worker.recv_timeout(remaining) {
                Some(response) => {
                    if self.scoreboard.apply(response) {
                        self.request_summary();
                    }
                }
                None => break,
            }
        }
        self.state.set_high_score(self.scoreboard.all_time_high);
        self.scoreboard.status
    }

    fn submit(&mut self, run: FinalRun) {
        let Some(worker) = &self.persistence else {
            return;
        };
        match worker.submit_run(run) {
            Ok(()) => self.scoreboard.mark_busy(),
            Err(e) => {
                log::warn!("Could not queue run for saving: {}", e);
                self.scoreboard.status = SyncStatus::Offline;
            }
        }
    }

    fn request_summary(&mut self) {
        let Some(worker) = &self.persistence else {
            return;
        };
        match worker.fetch_summary() {
            Ok(()) => self.scoreboard.mark_busy(),
            Err(e) => {
                log::warn!("Could not request history: {}", e);
                self.scoreboard.status = SyncStatus::Offline;
            }
        }
    }

    fn pump_persistence(&mut self) {
        let Some(worker) = &self.persistence else {
            return;
        };
        let mut refresh = false;
        for response in worker.drain() {
            refresh |= self.scoreboard.apply(response);
        }
        if refresh {
            self.request_summary();
        }
        self.state.set_high_score(self.scoreboard.all_time_high);
    }
}
