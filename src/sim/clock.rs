//! Simulation clock and frame pacing
//!
//! The simulation advances exactly one tick per frame opportunity, so there is
//! no accumulator here. [`FramePacer`] only exists for the native loop, which
//! has no display refresh to wait on.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Monotonic gameplay frame counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    frame: u64,
}

impl SimClock {
    /// Frames elapsed in the current run
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step forward one frame and return the new count
    pub fn advance(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// True when the current frame lands on the given cadence
    pub fn on_cadence(&self, every: u32) -> bool {
        every > 0 && self.frame.is_multiple_of(every as u64)
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}

/// Sleeps the calling thread so frames start at a fixed rate
#[derive(Debug)]
pub struct FramePacer {
    frame_time: Duration,
    next: Instant,
}

impl FramePacer {
    pub fn new(frames_per_second: u32) -> Self {
        let frame_time = Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64);
        Self {
            frame_time,
            next: Instant::now(),
        }
    }

    /// Unpaced, for tests and fast-forward
    pub fn unlimited() -> Self {
        Self {
            frame_time: Duration::ZERO,
            next: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Block until the next frame opportunity
    pub fn wait(&mut self) {
        if self.frame_time.is_zero() {
            return;
        }
        self.next += self.frame_time;
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        } else {
            // Fell behind: drop the backlog instead of bursting
            self.next = now;
        }
    }
}
