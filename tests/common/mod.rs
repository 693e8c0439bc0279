//! Shared fixtures for pr-automerge tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{CreateCommentCall, MergePrCall, MockPlatformService};

use pr_automerge::config::{CheckExclusion, MergeConfig};
use pr_automerge::error::Error;
use pr_automerge::merge::MergeObserver;
use pr_automerge::retry::RetryPolicy;
use pr_automerge::types::{
    CheckConclusion, CheckRun, CheckRunList, MergeMethod, MergeOutcome, PullRequest,
};
use std::sync::Mutex;

/// PR number used throughout the fixtures
pub const PR_NUMBER: u64 = 42;

/// Title marker used throughout the fixtures
pub const MARKER: &str = "New Crowdin updates";

pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::new()
}

pub fn make_pr(title: &str) -> PullRequest {
    PullRequest {
        id: 900_000 + PR_NUMBER,
        number: PR_NUMBER,
        title: title.to_string(),
    }
}

pub fn make_run(name: &str, conclusion: Option<CheckConclusion>) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: if conclusion.is_some() {
            "completed".to_string()
        } else {
            "in_progress".to_string()
        },
        conclusion,
    }
}

/// `passing` successful runs plus the automation's own in-flight run
pub fn make_checks(passing: usize, others: &[Option<CheckConclusion>]) -> CheckRunList {
    let mut runs: Vec<CheckRun> = (0..passing)
        .map(|i| make_run(&format!("job-{i}"), Some(CheckConclusion::Success)))
        .collect();
    runs.extend(
        others
            .iter()
            .enumerate()
            .map(|(i, c)| make_run(&format!("other-{i}"), *c)),
    );
    runs.push(make_run("automerge", None));

    CheckRunList {
        total_count: runs.len() as u64,
        check_runs: runs,
    }
}

pub fn retry_policy(timeout: u64, interval: u64, fail_step: bool) -> RetryPolicy {
    RetryPolicy::builder()
        .timeout_secs(timeout)
        .interval_secs(interval)
        .fail_step(fail_step)
        .build()
        .unwrap()
}

/// Config with checks enabled, no comment, real merge, fail-step on
pub fn merge_config() -> MergeConfig {
    MergeConfig {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        pull_number: PR_NUMBER,
        sha: "abc123".to_string(),
        title_marker: MARKER.to_string(),
        strategy: MergeMethod::Squash,
        honor_strategy: false,
        comment: None,
        dry_run: false,
        check_status: true,
        check_exclusion: CheckExclusion::SelfRun,
        retry: retry_policy(30, 10, true),
    }
}

/// Observer that records every event
#[derive(Default)]
pub struct RecordingObserver {
    pub attempts: Mutex<Vec<(u32, String)>>,
    pub comments: Mutex<Vec<u64>>,
    pub outcomes: Mutex<Vec<MergeOutcome>>,
    pub skipped: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn attempt_numbers(&self) -> Vec<u32> {
        self.attempts.lock().unwrap().iter().map(|(n, _)| *n).collect()
    }

    pub fn comments(&self) -> Vec<u64> {
        self.comments.lock().unwrap().clone()
    }

    pub fn skipped(&self) -> Vec<String> {
        self.skipped.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<MergeOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl MergeObserver for RecordingObserver {
    fn on_attempt(&self, attempt: u32, error: &Error) {
        self.attempts
            .lock()
            .unwrap()
            .push((attempt, error.to_string()));
    }

    fn on_comment(&self, comment_id: u64) {
        self.comments.lock().unwrap().push(comment_id);
    }

    fn on_outcome(&self, outcome: &MergeOutcome) {
        self.outcomes.lock().unwrap().push(*outcome);
    }

    fn on_skipped(&self, error: &Error) {
        self.skipped.lock().unwrap().push(error.to_string());
    }
}
