//! Score and dodge tracking for the current run

use serde::{Deserialize, Serialize};

use crate::consts::{DODGE_BONUS, SURVIVAL_SCORE_PER_TICK};

/// Running totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Raw cumulative score, never decreases during a run
    pub score: f64,
    pub obstacles_dodged: u32,
    /// Last high score reported by the run store
    pub high_score: u64,
}

/// What gets handed to the run store when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRun {
    pub score: u64,
    pub obstacles_dodged: u32,
}

impl RunStats {
    /// Credit obstacles that left the playfield
    pub fn record_dodges(&mut self, count: u32) {
        self.obstacles_dodged += count;
        self.score += count as f64 * DODGE_BONUS;
    }

    /// Per-tick survival bonus
    pub fn record_survival_tick(&mut self) {
        self.score += SURVIVAL_SCORE_PER_TICK;
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn finalize(&self) -> FinalRun {
        FinalRun {
            score: self.display_score(),
            obstacles_dodged: self.obstacles_dodged,
        }
    }

    /// Zero the run totals. The high score belongs to the store and is kept.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.obstacles_dodged = 0;
    }
}
