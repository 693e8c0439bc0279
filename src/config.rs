//! Merge configuration
//!
//! Everything here is built once, before any remote call, and never changes
//! afterwards.

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::types::MergeMethod;

/// How the status gate accounts for the check run executing this tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckExclusion {
    /// Assume exactly one run (ours) is still in flight and subtract it
    #[default]
    SelfRun,
    /// Drop runs with this name, then require every remaining run to pass
    Named(String),
}

/// Everything the orchestrator needs to gate and merge one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub pull_number: u64,
    /// Commit whose check runs are inspected
    pub sha: String,
    /// Substring the PR title must contain (case-sensitive)
    pub title_marker: String,
    /// Configured merge strategy
    pub strategy: MergeMethod,
    /// Use `strategy` for the merge call instead of always squashing
    pub honor_strategy: bool,
    /// Comment to post once gating succeeds
    pub comment: Option<String>,
    /// Run every gate and side effect except the merge itself
    pub dry_run: bool,
    /// Whether the status gate runs at all
    pub check_status: bool,
    /// How our own check run is excluded from the status gate
    pub check_exclusion: CheckExclusion,
    /// Timing and fail-step policy
    pub retry: RetryPolicy,
}

impl MergeConfig {
    /// Reject values no remote call could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::Config("repository owner is empty".to_string()));
        }
        if self.repo.trim().is_empty() {
            return Err(Error::Config("repository name is empty".to_string()));
        }
        if self.pull_number == 0 {
            return Err(Error::Config(
                "pull request number must be positive".to_string(),
            ));
        }
        if self.check_status && self.sha.trim().is_empty() {
            return Err(Error::Config(
                "commit sha is required when check-status is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a timeout or side-effect failure fails the invocation
    pub const fn fail_step(&self) -> bool {
        self.retry.fail_step()
    }

    /// The comment body to post, ignoring blank bodies
    pub fn comment_body(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .filter(|body| !body.trim().is_empty())
    }

    /// The method actually sent to the merge endpoint
    ///
    /// Squash unless `honor_strategy` is set.
    pub const fn merge_method(&self) -> MergeMethod {
        if self.honor_strategy {
            self.strategy
        } else {
            MergeMethod::Squash
        }
    }
}

/// Access token, kept out of logs
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting empty values
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Config("access token is empty".to_string()));
        }
        Ok(Self(token))
    }

    /// The raw token
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Full configuration for one invocation of the binary
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Gating and merge configuration
    pub merge: MergeConfig,
    /// GitHub access token
    pub token: Credential,
    /// Custom API base URL (GitHub Enterprise)
    pub api_url: Option<String>,
}
