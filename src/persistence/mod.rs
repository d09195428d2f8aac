//! Run history persistence
//!
//! Features:
//! - [`RunStore`] contract for submitting finished runs and reading history
//! - JSON file store with write-then-rename saves
//! - In-memory store for tests and offline play
//! - Background worker so the game loop never waits on storage

pub mod json_store;
pub mod memory;
pub mod worker;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::HISTORY_LIMIT;
use crate::error::PersistError;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use worker::{PersistenceWorker, Request, Response};

/// A stored run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique, strictly increasing
    pub id: u64,
    pub score: u64,
    pub obstacles_dodged: u32,
    /// Unix timestamp (ms) when stored
    pub created_at_ms: u64,
    /// Set when this run raised the all-time high
    #[serde(default)]
    pub is_new_high: bool,
}

impl RunRecord {
    /// Last four digits of the id, for compact listings
    pub fn short_id(&self) -> String {
        format!("{:04}", self.id % 10_000)
    }
}

/// Recent history plus the all-time high
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Most recent first
    pub recent_history: Vec<RunRecord>,
    pub all_time_high: u64,
}

/// Storage backend for finished runs
pub trait RunStore: Send {
    /// Store a finished run and report whether it set a new high
    fn submit_run(&mut self, score: u64, obstacles_dodged: u32) -> Result<RunRecord, PersistError>;

    /// Latest runs (most recent first) and the all-time high
    fn fetch_summary(&mut self) -> Result<Summary, PersistError>;
}

/// The stored document shared by the concrete stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    pub runs: Vec<RunRecord>,
    pub high_score: u64,
}

impl RunLog {
    /// Append a run. Ids are the timestamp, bumped to stay unique.
    pub fn insert(&mut self, score: u64, obstacles_dodged: u32, now_ms: u64) -> RunRecord {
        let id = match self.runs.last() {
            Some(last) if last.id >= now_ms => last.id + 1,
            _ => now_ms,
        };
        let is_new_high = score > self.high_score;
        if is_new_high {
            self.high_score = score;
        }
        let record = RunRecord {
            id,
            score,
            obstacles_dodged,
            created_at_ms: now_ms,
            is_new_high,
        };
        self.runs.push(record.clone());
        record
    }

    pub fn summary(&self) -> Summary {
        Summary {
            recent_history: self.runs.iter().rev().take(HISTORY_LIMIT).cloned().collect(),
            all_time_high: self.high_score,
        }
    }
}

/// Current Unix time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
