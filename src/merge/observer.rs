//! Progress reporting for the merge gate

use crate::error::Error;
use crate::types::MergeOutcome;
use tracing::{info, warn};

/// Receives progress events from [`super::MergeOrchestrator`]
///
/// The orchestrator never logs attempt failures or terminal results itself;
/// it reports them here so the gate can be tested without a logging sink.
pub trait MergeObserver: Send + Sync {
    /// An attempt failed and will be retried if time remains
    fn on_attempt(&self, attempt: u32, error: &Error);

    /// A comment was posted; fires before the merge call, so the ID is known
    /// even when the merge then fails
    fn on_comment(&self, comment_id: u64);

    /// Gating succeeded and the side effects completed
    fn on_outcome(&self, outcome: &MergeOutcome);

    /// The run ended without merging and fail-step is off
    ///
    /// Covers both a gating timeout and a swallowed side-effect error.
    fn on_skipped(&self, error: &Error);
}

/// Observer that writes every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn on_attempt(&self, attempt: u32, error: &Error) {
        warn!(attempt, %error, "merge gate not satisfied");
    }

    fn on_comment(&self, comment_id: u64) {
        info!(comment_id, "posted comment");
    }

    fn on_outcome(&self, outcome: &MergeOutcome) {
        info!(
            merged = outcome.merged,
            comment_id = ?outcome.comment_id,
            "merge step finished"
        );
    }

    fn on_skipped(&self, error: &Error) {
        warn!(%error, "merge skipped, fail-step is disabled");
    }
}
