//! Error types for the fallible edges of the game.
//!
//! The simulation itself never fails. Only configuration loading and the
//! persistence boundary can, and neither is allowed to stop a run.

use thiserror::Error;

/// Failure talking to the run store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("run store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("run store data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The store refused or could not be reached.
    #[error("run store unreachable: {0}")]
    Unreachable(String),

    /// The background worker thread has exited.
    #[error("persistence worker has shut down")]
    WorkerGone,
}

/// Failure loading or validating tunables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tunable '{name}' = {value} is out of range ({expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}
