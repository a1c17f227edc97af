//! Executor-internal faults.

use thiserror::Error;
use tokio::sync::AcquireError;
use tokio::task::JoinError;

/// A fault that prevented the batch from producing one result per address.
///
/// Per-address failures never appear here; they become `NotFound` results.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A geocoding task panicked or was cancelled.
    #[error("geocoding task failed: {0}")]
    Task(#[from] JoinError),

    /// The worker pool was closed while addresses were still queued.
    #[error("worker pool closed: {0}")]
    PoolClosed(#[from] AcquireError),

    /// No result was recorded for the address at this position.
    #[error("no result recorded for address #{0}")]
    MissingResult(usize),
}
