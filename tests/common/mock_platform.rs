//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_automerge::error::{Error, Result};
use pr_automerge::platform::PlatformService;
use pr_automerge::types::{
    CheckRunList, IssueComment, MergeMethod, MergeResult, PullRequest,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_issue_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub issue_number: u64,
    pub body: String,
}

/// Call record for `merge_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Scripted responses: the Nth fetch returns the Nth scripted snapshot,
///   and the last snapshot repeats once the script runs out
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    next_comment_id: AtomicU64,
    pr_script: Mutex<Vec<PullRequest>>,
    checks_script: Mutex<Vec<CheckRunList>>,
    merge_response: Mutex<MergeResult>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    list_checks_calls: Mutex<Vec<String>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    get_pr_failures_left: Mutex<u32>,
    error_on_create_comment: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create a new mock with no scripted responses
    pub fn new() -> Self {
        Self {
            next_comment_id: AtomicU64::new(1000),
            pr_script: Mutex::new(Vec::new()),
            checks_script: Mutex::new(Vec::new()),
            merge_response: Mutex::new(MergeResult {
                merged: true,
                sha: Some("merged_sha".to_string()),
                message: None,
            }),
            get_pr_calls: Mutex::new(Vec::new()),
            list_checks_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            get_pr_failures_left: Mutex::new(0),
            error_on_create_comment: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Every `get_pull_request` call returns this PR
    pub fn set_pr(&self, pr: PullRequest) {
        *self.pr_script.lock().unwrap() = vec![pr];
    }

    /// Successive `get_pull_request` calls walk through these PRs
    pub fn script_prs(&self, prs: Vec<PullRequest>) {
        *self.pr_script.lock().unwrap() = prs;
    }

    /// Every `list_checks_for_ref` call returns these runs
    pub fn set_checks(&self, checks: CheckRunList) {
        *self.checks_script.lock().unwrap() = vec![checks];
    }

    /// Successive `list_checks_for_ref` calls walk through these lists
    pub fn script_checks(&self, checks: Vec<CheckRunList>) {
        *self.checks_script.lock().unwrap() = checks;
    }

    /// Set the response for `merge_pull_request`
    pub fn set_merge_response(&self, result: MergeResult) {
        *self.merge_response.lock().unwrap() = result;
    }

    // === Error injection methods ===

    /// Make the next `times` calls to `get_pull_request` fail
    pub fn fail_get_pr_times(&self, times: u32) {
        *self.get_pr_failures_left.lock().unwrap() = times;
    }

    /// Make `create_issue_comment` return an error
    pub fn fail_create_comment(&self, msg: &str) {
        *self.error_on_create_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull_request` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all `get_pull_request` calls
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Get all refs `list_checks_for_ref` was called with
    pub fn get_list_checks_calls(&self) -> Vec<String> {
        self.list_checks_calls.lock().unwrap().clone()
    }

    /// Get all `create_issue_comment` calls
    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pull_request` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Number of attempts made, judged by PR fetches
    pub fn attempt_count(&self) -> usize {
        self.get_pr_calls.lock().unwrap().len()
    }

    /// Get count of `merge_pull_request` calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }

    /// Assert that `merge_pull_request` was called with a specific method
    pub fn assert_merge_called_with_method(&self, pr_number: u64, method: MergeMethod) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number && c.method == method),
            "Expected merge_pull_request({pr_number}, {method:?}) but got: {calls:?}"
        );
    }

    /// Assert that nothing was posted or merged
    pub fn assert_no_side_effects(&self) {
        let comments = self.get_create_comment_calls();
        let merges = self.get_merge_pr_calls();
        assert!(comments.is_empty(), "Expected no comments but got: {comments:?}");
        assert!(merges.is_empty(), "Expected no merges but got: {merges:?}");
    }
}

/// Pick the response for the `call`th request (0-based), repeating the last
fn scripted<T: Clone>(script: &[T], call: usize) -> Option<T> {
    script.get(call).or_else(|| script.last()).cloned()
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        let call = {
            let mut calls = self.get_pr_calls.lock().unwrap();
            calls.push(pr_number);
            calls.len() - 1
        };

        // Check for injected error
        {
            let mut left = self.get_pr_failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(Error::Platform("injected get_pull_request failure".to_string()));
            }
        }

        let script = self.pr_script.lock().unwrap();
        scripted(&script, call).ok_or_else(|| {
            Error::Platform(format!(
                "get_pull_request: no response configured for PR #{pr_number}"
            ))
        })
    }

    async fn list_checks_for_ref(&self, git_ref: &str) -> Result<CheckRunList> {
        let call = {
            let mut calls = self.list_checks_calls.lock().unwrap();
            calls.push(git_ref.to_string());
            calls.len() - 1
        };

        let script = self.checks_script.lock().unwrap();
        Ok(scripted(&script, call).unwrap_or_default())
    }

    async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<IssueComment> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                issue_number,
                body: body.to_string(),
            });

        // Check for injected error
        if let Some(msg) = self.error_on_create_comment.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(IssueComment {
            id: self.next_comment_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn merge_pull_request(
        &self,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        // Check for injected error
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.merge_response.lock().unwrap().clone())
    }
}
