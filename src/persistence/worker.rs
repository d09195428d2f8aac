//! Background persistence worker
//!
//! The run store lives on its own thread. The game loop sends requests over a
//! channel and drains responses without blocking, so a slow or dead store can
//! never stall a frame.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{RunRecord, RunStore, Summary};
use crate::error::PersistError;
use crate::sim::FinalRun;

/// Work for the store thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    SubmitRun(FinalRun),
    FetchSummary,
}

/// Result of one request
#[derive(Debug)]
pub enum Response {
    Submitted(Result<RunRecord, PersistError>),
    Summary(Result<Summary, PersistError>),
}

/// Handle to the store thread. Dropping it shuts the thread down.
#[derive(Debug)]
pub struct PersistenceWorker {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
}

impl PersistenceWorker {
    /// Move `store` onto a new thread
    pub fn spawn<S: RunStore + 'static>(mut store: S) -> Result<Self, PersistError> {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (resp_tx, resp_rx) = mpsc::channel::<Response>();

        let handle = thread::Builder::new()
            .name("persistence".to_string())
            .spawn(move || {
                for request in req_rx {
                    let response = match request {
                        Request::SubmitRun(run) => Response::Submitted(
                            store.submit_run(run.score, run.obstacles_dodged),
                        ),
                        Request::FetchSummary => Response::Summary(store.fetch_summary()),
                    };
                    if resp_tx.send(response).is_err() {
                        break;
                    }
                }
                log::debug!("Persistence worker stopped");
            })?;

        Ok(Self {
            requests: Some(req_tx),
            responses: resp_rx,
            handle: Some(handle),
        })
    }

    fn send(&self, request: Request) -> Result<(), PersistError> {
        self.requests
            .as_ref()
            .ok_or(PersistError::WorkerGone)?
            .send(request)
            .map_err(|_| PersistError::WorkerGone)
    }

    /// Queue a finished run. Does not wait for the store.
    pub fn submit_run(&self, run: FinalRun) -> Result<(), PersistError> {
        self.send(Request::SubmitRun(run))
    }

    /// Queue a history refresh
    pub fn fetch_summary(&self) -> Result<(), PersistError> {
        self.send(Request::FetchSummary)
    }

    /// Non-blocking receive of a single response
    pub fn try_recv(&self) -> Option<Response> {
        self.responses.try_recv().ok()
    }

    /// Drain all currently queued responses
    pub fn drain(&self) -> Vec<Response> {
        let mut out = Vec::new();
        while let Some(response) = self.try_recv() {
            out.push(response);
        }
        out
    }

    /// Wait up to `timeout` for the next response
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Response> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Persistence worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_submit_and_fetch() {
        let worker = PersistenceWorker::spawn(MemoryStore::new()).unwrap();
        worker
            .submit_run(FinalRun {
                score: 321,
                obstacles_dodged: 7,
            })
            .unwrap();

        match worker.recv_timeout(WAIT) {
            Some(Response::Submitted(Ok(record))) => {
                assert_eq!(record.score, 321);
                assert!(record.is_new_high);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        worker.fetch_summary().unwrap();
        match worker.recv_timeout(WAIT) {
            Some(Response::Summary(Ok(summary))) => {
                assert_eq!(summary.all_time_high, 321);
                assert_eq!(summary.recent_history.len(), 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_failures_come_back_as_responses() {
        let worker = PersistenceWorker::spawn(MemoryStore::unreachable()).unwrap();
        worker.fetch_summary().unwrap();
        assert!(matches!(
            worker.recv_timeout(WAIT),
            Some(Response::Summary(Err(PersistError::Unreachable(_))))
        ));
    }

    #[test]
    fn test_drain_empty_does_not_block() {
        let worker = PersistenceWorker::spawn(MemoryStore::new()).unwrap();
        assert!(worker.drain().is_empty());
    }
}
