//! Gating predicates - pure functions over fetched snapshots
//!
//! No I/O happens here. The orchestrator fetches the pull request and its
//! check runs, then asks these functions whether the merge may proceed.

use crate::config::CheckExclusion;
use crate::types::{CheckRunList, PullRequest, ValidationResult};

/// Title gate: passes iff the PR title contains `marker`
///
/// Plain case-sensitive substring match. An empty marker always passes.
pub fn validate_title(pr: &PullRequest, marker: &str) -> ValidationResult {
    if pr.title.contains(marker) {
        return ValidationResult::passed();
    }

    ValidationResult::failed(format!(
        "PR #{} (id {}) title {:?} does not contain {:?}",
        pr.number, pr.id, pr.title, marker
    ))
}

/// Status gate: passes once every check except our own has succeeded
///
/// With [`CheckExclusion::SelfRun`] the count is purely arithmetic:
/// `total - 1 == succeeded`, where the one missing run is assumed to be the
/// one executing this gate. An empty check list therefore never passes.
///
/// With [`CheckExclusion::Named`] runs carrying that name are dropped and
/// every remaining run must be `success` or `skipped`.
pub fn validate_check_status(checks: &CheckRunList, exclusion: &CheckExclusion) -> ValidationResult {
    match exclusion {
        CheckExclusion::SelfRun => {
            let total = checks.total_count;
            let succeeded = checks.passing_count();
            if total.checked_sub(1) == Some(succeeded) {
                ValidationResult::passed()
            } else {
                ValidationResult::failed(format!(
                    "{succeeded} of {total} check runs succeeded, waiting for {}",
                    total.saturating_sub(1)
                ))
            }
        }
        CheckExclusion::Named(own_name) => {
            let pending: Vec<&str> = checks
                .check_runs
                .iter()
                .filter(|run| run.name != *own_name)
                .filter(|run| !run.is_passing())
                .map(|run| run.name.as_str())
                .collect();

            if pending.is_empty() {
                ValidationResult::passed()
            } else {
                ValidationResult::failed(format!(
                    "waiting for check runs: {}",
                    pending.join(", ")
                ))
            }
        }
    }
}
