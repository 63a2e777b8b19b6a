//! Progress reporting for batch extraction.
//!
//! [`ProgressCallback`] keeps the batch driver independent of how progress
//! is rendered. The CLI supplies an `indicatif` bar; tests and library
//! callers can pass [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates from a running batch.
///
/// Implementations must be `Send + Sync` so one instance can be shared
/// with the tasks of a batch.
pub trait ProgressCallback: Send + Sync {
    /// Sets the number of documents in the batch.
    fn set_total(&self, total: u64);

    /// Advances by `delta` documents.
    fn inc(&self, delta: u64);

    /// Updates the message shown next to the indicator.
    fn set_message(&self, msg: String);

    /// Marks the batch complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
