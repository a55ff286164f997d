//! Worker thread for fstation's background fetches.
//!
//! Text previews are fetched off the owner's thread. Requests [WorkerTask] go in through a
//! channel, results [WorkerResponse] come back through another one, and the owner applies them
//! to its state whenever it polls.
//!
//! Every task carries a request id and a cancellation token. The worker never sends a response
//! for a cancelled task, and the receiving side still compares ids before applying anything.
//!
//! Cancellation is checked before and after a fetch, not during it. A fetch that is already in
//! flight runs until it completes or hits the client timeout (`network.timeout_secs`), and the
//! next task waits behind it.
//!
//! # Caution:
//! This module is a protocol boundary. Adding or editing variants here usually needs matching
//! changes in the preview slot and in the front end's response handling.

use crate::core::fetch::{Fetch, FetchError, FetchedBody};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Owns the worker channels.
pub struct Workers {
    fetch_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the fetch worker around the given fetcher.
    pub fn spawn(fetcher: Arc<dyn Fetch>) -> Self {
        let (fetch_tx, fetch_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_fetch_worker(fetcher, fetch_rx, res_tx);

        Self {
            fetch_tx,
            response_rx,
        }
    }

    /// Accessor for the fetch worker task sender.
    pub fn fetch_tx(&self) -> &Sender<WorkerTask> {
        &self.fetch_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker thread via channel.
#[derive(Debug)]
pub enum WorkerTask {
    FetchText {
        href: String,
        limit: usize,
        cancel: Arc<AtomicBool>,
        request_id: u64,
    },
}

/// Responses sent from the worker thread back to the owner.
#[derive(Debug)]
pub enum WorkerResponse {
    TextFetched {
        result: Result<FetchedBody, FetchError>,
        request_id: u64,
    },
}

impl WorkerResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::TextFetched { request_id, .. } => *request_id,
        }
    }
}

/// Starts the fetch worker thread.
///
/// Queued tasks are coalesced so only the newest one is fetched; anything older belongs to a
/// preview that has already been replaced.
///
/// # Arguments
/// * `fetcher` - The I/O boundary used for every request
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for outgoing responses
fn start_fetch_worker(
    fetcher: Arc<dyn Fetch>,
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::FetchText {
                mut href,
                mut limit,
                mut cancel,
                mut request_id,
            } = task;

            while let Ok(WorkerTask::FetchText {
                href: h,
                limit: l,
                cancel: c,
                request_id: id,
            }) = task_rx.try_recv()
            {
                tracing::trace!(superseded = request_id, by = id, "coalescing fetch");
                href = h;
                limit = l;
                cancel = c;
                request_id = id;
            }

            if cancel.load(Ordering::Acquire) {
                tracing::debug!(request_id, "fetch cancelled before start");
                continue;
            }

            let result = fetcher.fetch(&href, limit);

            if cancel.load(Ordering::Acquire) {
                tracing::debug!(request_id, "fetch cancelled, dropping response");
                continue;
            }

            if let Err(e) = &result {
                tracing::warn!(request_id, %href, error = %e, "preview fetch failed");
            }
            if res_tx
                .send(WorkerResponse::TextFetched { result, request_id })
                .is_err()
            {
                break;
            }
        }
    });
}

/// Worker thread tests.
#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam_channel::bounded;
    use std::time::Duration;

    /// Answers every href with its own bytes, after waiting for a go signal.
    struct GatedFetcher {
        gate: Receiver<()>,
    }

    impl Fetch for GatedFetcher {
        fn fetch(&self, href: &str, _limit: usize) -> Result<FetchedBody, FetchError> {
            let _ = self.gate.recv_timeout(Duration::from_secs(2));
            Ok(FetchedBody::new(href.as_bytes().to_vec(), None))
        }
    }

    struct FailingFetcher;

    impl Fetch for FailingFetcher {
        fn fetch(&self, _href: &str, _limit: usize) -> Result<FetchedBody, FetchError> {
            Err(FetchError::Status(404))
        }
    }

    fn task(href: &str, request_id: u64) -> (WorkerTask, Arc<AtomicBool>) {
        let cancel = Arc::new(AtomicBool::new(false));
        (
            WorkerTask::FetchText {
                href: href.to_string(),
                limit: 16,
                cancel: Arc::clone(&cancel),
                request_id,
            },
            cancel,
        )
    }

    #[test]
    fn fetch_result_comes_back_with_its_id() -> Result<(), Box<dyn std::error::Error>> {
        let (go_tx, go_rx) = bounded(4);
        let workers = Workers::spawn(Arc::new(GatedFetcher { gate: go_rx }));

        let (t, _cancel) = task("a.txt", 7);
        workers.fetch_tx().send(t)?;
        go_tx.send(())?;

        match workers.response_rx().recv_timeout(Duration::from_secs(2))? {
            WorkerResponse::TextFetched { result, request_id } => {
                assert_eq!(request_id, 7);
                assert_eq!(result?.bytes(), b"a.txt");
            }
        }
        Ok(())
    }

    #[test]
    fn cancelled_fetch_sends_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let (go_tx, go_rx) = bounded(4);
        let workers = Workers::spawn(Arc::new(GatedFetcher { gate: go_rx }));

        let (t, cancel) = task("slow.txt", 1);
        workers.fetch_tx().send(t)?;
        // worker is now parked inside fetch
        thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::Release);
        go_tx.send(())?;

        assert!(
            workers
                .response_rx()
                .recv_timeout(Duration::from_millis(300))
                .is_err(),
            "cancelled fetch must not produce a response"
        );
        Ok(())
    }

    #[test]
    fn next_task_waits_for_in_flight_fetch() -> Result<(), Box<dyn std::error::Error>> {
        let (go_tx, go_rx) = bounded(4);
        let workers = Workers::spawn(Arc::new(GatedFetcher { gate: go_rx }));

        let (slow, cancel) = task("slow.txt", 1);
        workers.fetch_tx().send(slow)?;
        thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::Release);

        let (next, _cancel) = task("next.txt", 2);
        workers.fetch_tx().send(next)?;
        assert!(
            workers
                .response_rx()
                .recv_timeout(Duration::from_millis(200))
                .is_err(),
            "in-flight fetch is not interrupted by cancellation"
        );

        go_tx.send(())?;
        go_tx.send(())?;
        let resp = workers.response_rx().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(resp.request_id(), 2);
        Ok(())
    }

    #[test]
    fn failures_are_forwarded() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn(Arc::new(FailingFetcher));
        let (t, _cancel) = task("missing.txt", 3);
        workers.fetch_tx().send(t)?;

        let resp = workers.response_rx().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(resp.request_id(), 3);
        match resp {
            WorkerResponse::TextFetched { result, .. } => {
                assert_eq!(result, Err(FetchError::Status(404)));
            }
        }
        Ok(())
    }
}
