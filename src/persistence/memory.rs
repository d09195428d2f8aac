//! In-process run store

use super::{RunLog, RunRecord, RunStore, Summary, now_ms};
use crate::error::PersistError;

/// Keeps runs in memory. Can be switched offline to exercise failure paths.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    log: RunLog,
    reachable: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            log: RunLog::default(),
            reachable: true,
        }
    }

    /// A store that fails every call
    pub fn unreachable() -> Self {
        Self {
            log: RunLog::default(),
            reachable: false,
        }
    }

    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    fn check(&self) -> Result<(), PersistError> {
        if self.reachable {
            Ok(())
        } else {
            Err(PersistError::Unreachable("memory store offline".to_string()))
        }
    }
}

impl RunStore for MemoryStore {
    fn submit_run(&mut self, score: u64, obstacles_dodged: u32) -> Result<RunRecord, PersistError> {
        self.check()?;
        Ok(self.log.insert(score, obstacles_dodged, now_ms()))
    }

    fn fetch_summary(&mut self) -> Result<Summary, PersistError> {
        self.check()?;
        Ok(self.log.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_store_fails() {
        let mut store = MemoryStore::unreachable();
        assert!(matches!(
            store.submit_run(10, 1),
            Err(PersistError::Unreachable(_))
        ));
        assert!(store.fetch_summary().is_err());

        store.set_reachable(true);
        assert!(store.submit_run(10, 1).is_ok());
        assert_eq!(store.fetch_summary().unwrap().all_time_high, 10);
    }
}
