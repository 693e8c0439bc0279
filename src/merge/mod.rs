//! Merge gate for a single pull request
//!
//! Two layers, mirroring the rest of the crate:
//! 1. Validate - pure gating predicates over fetched snapshots
//! 2. Orchestrate - retry the predicates, then comment and merge (effectful)

mod observer;
mod orchestrate;
mod validate;

pub use observer::{MergeObserver, TracingObserver};
pub use orchestrate::MergeOrchestrator;
pub use validate::{validate_check_status, validate_title};
