//! Run history read model
//!
//! Fed only by persistence responses and read only by the display. The
//! simulation never consults it for game rules.

use serde::{Deserialize, Serialize};

use crate::persistence::{Response, RunRecord, Summary};

/// Where the scoreboard stands relative to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Busy,
    /// Showing the latest store data
    Synced,
    /// The last request failed, data may be stale
    Offline,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "IDLE",
            SyncStatus::Busy => "BUSY",
            SyncStatus::Synced => "SYNCED",
            SyncStatus::Offline => "OFFLINE",
        }
    }
}

/// What the display shows about past runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Most recent first
    pub recent_history: Vec<RunRecord>,
    pub all_time_high: u64,
    /// Record returned for the run just submitted
    pub last_submitted: Option<RunRecord>,
    pub status: SyncStatus,
    /// Requests sent but not yet answered
    #[serde(skip)]
    pending: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that a request was sent
    pub fn mark_busy(&mut self) {
        self.pending += 1;
        self.status = SyncStatus::Busy;
    }

    /// Number of requests still waiting for a response
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Fold a worker response into the board.
    ///
    /// Returns true when a successful submit means the history should be
    /// refreshed. Failures are logged and leave the existing data in place.
    /// The board only reads `Synced` once every request has been answered.
    pub fn apply(&mut self, response: Response) -> bool {
        self.pending = self.pending.saturating_sub(1);
        match response {
            Response::Submitted(Ok(record)) => {
                if record.is_new_high {
                    log::info!("New all-time high: {}", record.score);
                    self.all_time_high = self.all_time_high.max(record.score);
                }
                self.last_submitted = Some(record);
                true
            }
            Response::Submitted(Err(e)) => {
                log::warn!("Could not save run, history unchanged: {}", e);
                self.status = SyncStatus::Offline;
                false
            }
            Response::Summary(Ok(summary)) => {
                self.apply_summary(summary);
                false
            }
            Response::Summary(Err(e)) => {
                log::warn!("Run store unreachable, showing stale history: {}", e);
                self.status = SyncStatus::Offline;
                false
            }
        }
    }

    fn apply_summary(&mut self, summary: Summary) {
        log::info!(
            "History synced: {} runs, all-time high {}",
            summary.recent_history.len(),
            summary.all_time_high
        );
        self.recent_history = summary.recent_history;
        self.all_time_high = summary.all_time_high;
        if self.pending == 0 {
            self.status = SyncStatus::Synced;
        }
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.recent_history.is_empty()
    }

    /// Get the top score (if any runs are known)
    pub fn top_score(&self) -> Option<u64> {
        (self.all_time_high > 0 || !self.is_empty()).then_some(self.all_time_high)
    }
}
