//! pr-automerge: merge a pull request from CI once it is ready
//!
//! The crate waits for a title marker and for every other status check on the
//! target commit to succeed, then optionally comments and merges.
//!
//! - [`retry`] - bounded-duration retry loop
//! - [`merge`] - gating predicates and the merge orchestrator
//! - [`platform`] - the Git-hosting service and its GitHub implementation

pub mod config;
pub mod error;
pub mod merge;
pub mod output;
pub mod platform;
pub mod retry;
pub mod types;
