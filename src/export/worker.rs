//! Export orchestration
//!
//! [`ExportWorker`] owns one long-lived worker thread that runs the render
//! pipeline off the caller's thread. The two sides share nothing: each
//! request crosses the boundary as a serialized snapshot envelope and comes
//! back over its own reply channel, so concurrent exports are independent
//! and resolve in completion order.
//!
//! Lifecycle per request: requested (snapshot captured and encoded) →
//! dispatched (envelope handed to the worker) → completed or failed. There
//! is no retry and no mid-flight cancellation; a caller that no longer
//! wants the result just drops the job.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::domain::{Catalog, DietForm};
use crate::stats::StatsTree;

use super::document::{render, ExportStyle, RenderedDocument};
use super::snapshot::ExportSnapshot;

/// How an export request can fail
///
/// `WorkerUnavailable` is deliberately distinct from `Render`: the former
/// means the worker context is gone and a fresh dispatch may succeed, the
/// latter means this content failed to render and re-dispatching the same
/// snapshot will fail the same way.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Export worker is unavailable")]
    WorkerUnavailable,

    #[error("Snapshot envelope could not be encoded: {0}")]
    Snapshot(String),
}

/// State of an export request, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    /// Snapshot captured but not yet handed to the worker
    Requested,
    /// Envelope is with the worker; a reply will arrive on the job channel
    Dispatched,
}

struct WorkerRequest {
    id: u64,
    envelope: Vec<u8>,
    style: ExportStyle,
    reply: mpsc::Sender<Result<RenderedDocument, ExportError>>,
}

/// A single in-flight export
///
/// Obtained from [`ExportWorker::request_export`]; resolves exactly once
/// via [`ExportJob::wait`].
pub struct ExportJob {
    id: u64,
    state: ExportState,
    receiver: mpsc::Receiver<Result<RenderedDocument, ExportError>>,
}

impl ExportJob {
    /// Returns the request correlation id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the request state at dispatch time
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Blocks until the export completes or fails
    ///
    /// A disconnected reply channel means the worker died before answering
    /// and surfaces as `WorkerUnavailable`.
    pub fn wait(self) -> Result<RenderedDocument, ExportError> {
        match self.receiver.recv() {
            Ok(result) => result,
            Err(mpsc::RecvError) => Err(ExportError::WorkerUnavailable),
        }
    }
}

/// Owns the worker thread and dispatches export requests to it
pub struct ExportWorker {
    sender: Option<mpsc::Sender<WorkerRequest>>,
    handle: Option<JoinHandle<()>>,
    next_id: u64,
}

impl ExportWorker {
    /// Spawns the worker thread
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel::<WorkerRequest>();

        let handle = thread::Builder::new()
            .name("mealplan-export".to_string())
            .spawn(move || worker_loop(receiver))
            .ok();

        Self {
            sender: Some(sender),
            handle,
            next_id: 1,
        }
    }

    /// Captures a snapshot of the caller's live state and dispatches it
    ///
    /// The snapshot is deep-copied and encoded before anything is sent, so
    /// edits made after this call can never affect the export.
    pub fn request_export(
        &mut self,
        diet_form: &DietForm,
        stats_tree: &StatsTree,
        catalog: &Catalog,
        style: &ExportStyle,
    ) -> ExportJob {
        let id = self.next_id;
        self.next_id += 1;

        let (reply, receiver) = mpsc::channel();

        let snapshot = ExportSnapshot::capture(diet_form, stats_tree, catalog);
        let envelope = match snapshot.encode() {
            Ok(bytes) => bytes,
            Err(err) => {
                // Resolve the job immediately; nothing was dispatched
                let _ = reply.send(Err(ExportError::Snapshot(err.to_string())));
                return ExportJob {
                    id,
                    state: ExportState::Requested,
                    receiver,
                };
            }
        };

        let state = match &self.sender {
            Some(sender) => {
                let request = WorkerRequest {
                    id,
                    envelope,
                    style: style.clone(),
                    reply,
                };
                match sender.send(request) {
                    Ok(()) => ExportState::Dispatched,
                    // Dropped reply sender makes wait() report WorkerUnavailable
                    Err(_) => ExportState::Requested,
                }
            }
            None => ExportState::Requested,
        };

        ExportJob {
            id,
            state,
            receiver,
        }
    }

    /// Stops the worker and waits for it to exit
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        // Closing the request channel ends the worker loop
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ExportWorker {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

/// Runs on the worker thread until the request channel closes
fn worker_loop(receiver: mpsc::Receiver<WorkerRequest>) {
    while let Ok(request) = receiver.recv() {
        let result = handle_request(&request.envelope, &request.style);
        // The requester may have dropped the job; that is not an error
        let _ = request.reply.send(result);
    }
}

/// Decodes one envelope and renders it, containing any panic
fn handle_request(
    envelope: &[u8],
    style: &ExportStyle,
) -> Result<RenderedDocument, ExportError> {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let snapshot =
            ExportSnapshot::decode(envelope).map_err(|e| ExportError::Snapshot(e.to_string()))?;
        render(&snapshot, style).map_err(|e| ExportError::Render(e.to_string()))
    }));

    match outcome {
        Ok(result) => result,
        Err(_) => Err(ExportError::Render("renderer panicked".to_string())),
    }
}
