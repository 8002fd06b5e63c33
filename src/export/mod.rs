//! Export pipeline
//!
//! Snapshots a diet form plus its computed stats tree, carries the snapshot
//! across a worker-thread boundary as a serialized envelope, and renders it
//! into a paginated PDF. Export is the only asynchronous operation in the
//! core; aggregation itself never suspends.

mod document;
mod pdf;
mod snapshot;
mod worker;

pub use document::{render, ExportStyle, RenderError, RenderedDocument};
pub use snapshot::ExportSnapshot;
pub use worker::{ExportError, ExportJob, ExportState, ExportWorker};
