//! JSON file backed run store
//!
//! The whole log is rewritten on every submit: serialize to a `.tmp` sibling,
//! then rename over the real file so a crash never leaves half a document.
//! A log that no longer parses is moved to a `.bad` sibling and replaced by a
//! fresh one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{RunLog, RunRecord, RunStore, Summary, now_ms};
use crate::error::PersistError;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log; a missing or corrupt file is an empty log
    fn read(&self) -> Result<RunLog, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RunLog::default()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&json) {
            Ok(log) => Ok(log),
            Err(e) => {
                let bad = self.quarantine_path();
                log::warn!(
                    "Run log {} is corrupt ({}), moving it to {} and starting fresh",
                    self.path.display(),
                    e,
                    bad.display()
                );
                fs::rename(&self.path, &bad)?;
                Ok(RunLog::default())
            }
        }
    }

    fn quarantine_path(&self) -> PathBuf {
        self.path.with_extension("json.bad")
    }

    fn write(&self, log: &RunLog) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(log)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RunStore for JsonFileStore {
    fn submit_run(&mut self, score: u64, obstacles_dodged: u32) -> Result<RunRecord, PersistError> {
        let mut log = self.read()?;
        let record = log.insert(score, obstacles_dodged, now_ms());
        self.write(&log)?;
        log::info!(
            "Run {} saved to {} (score {}, new high: {})",
            record.id,
            self.path.display(),
            record.score,
            record.is_new_high
        );
        Ok(record)
    }

    fn fetch_summary(&mut self) -> Result<Summary, PersistError> {
        let log = self.read()?;
        log::debug!("Loaded {} runs from {}", log.runs.len(), self.path.display());
        Ok(log.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "astro_dodge_{}_{}_{}.json",
            name,
            std::process::id(),
            now_ms()
        ))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.fetch_summary().unwrap(), Summary::default());
    }

    #[test]
    fn test_submit_then_fetch() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        let first = store.submit_run(120, 4).unwrap();
        let second = store.submit_run(80, 2).unwrap();
        assert!(first.is_new_high);
        assert!(!second.is_new_high);
        assert!(second.id > first.id);

        // A fresh handle sees the same data
        let mut reopened = JsonFileStore::new(&path);
        let summary = reopened.fetch_summary().unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(summary.all_time_high, 120);
        assert_eq!(summary.recent_history, vec![second, first]);
    }

    #[test]
    fn test_corrupt_file_is_set_aside() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);
        let bad = store.quarantine_path();

        let summary = store.fetch_summary().unwrap();
        assert_eq!(summary, Summary::default());
        assert_eq!(fs::read_to_string(&bad).unwrap(), "{ not json");

        // Later submits work against a fresh log
        let record = store.submit_run(90, 3).unwrap();
        let summary = store.fetch_summary().unwrap();
        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&bad);

        assert!(record.is_new_high);
        assert_eq!(summary.recent_history, vec![record]);
        assert_eq!(summary.all_time_high, 90);
    }
}
