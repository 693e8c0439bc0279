//! Core types for pr-automerge

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Snapshot of a pull request, fetched fresh on every attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Numeric database id
    pub id: u64,
    /// PR number within the repository
    pub number: u64,
    /// PR title
    pub title: String,
}

/// Final conclusion reported by a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// The check passed
    Success,
    /// The check was skipped
    Skipped,
    /// The check finished without a verdict
    Neutral,
    /// The check failed
    Failure,
    /// The check was cancelled
    Cancelled,
    /// The check ran out of time
    TimedOut,
    /// The check needs a manual action
    ActionRequired,
    /// The check went stale
    Stale,
    /// A conclusion this crate does not know about
    #[serde(other)]
    Unknown,
}

/// A single check run attached to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check run name (job name for GitHub Actions)
    pub name: String,
    /// Lifecycle status: `queued`, `in_progress` or `completed`
    pub status: String,
    /// Conclusion, `None` while the run is still in flight
    pub conclusion: Option<CheckConclusion>,
}

impl CheckRun {
    /// Whether this run counts towards the success total
    ///
    /// Only `success` and `skipped` qualify; `neutral` does not.
    pub const fn is_passing(&self) -> bool {
        matches!(
            self.conclusion,
            Some(CheckConclusion::Success | CheckConclusion::Skipped)
        )
    }
}

/// All check runs reported for a git ref
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunList {
    /// Total number of runs reported by the API
    pub total_count: u64,
    /// The runs themselves
    pub check_runs: Vec<CheckRun>,
}

impl CheckRunList {
    /// Number of runs concluded as `success` or `skipped`
    pub fn passing_count(&self) -> u64 {
        self.check_runs.iter().filter(|r| r.is_passing()).count() as u64
    }
}

/// A comment created on a pull request's issue thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment ID
    pub id: u64,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    #[default]
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl FromStr for MergeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            other => Err(Error::Config(format!(
                "unknown merge strategy '{other}' (expected merge, squash or rebase)"
            ))),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Outcome of evaluating one gating predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the predicate failed
    pub failed: bool,
    /// Diagnostic message (empty when the predicate passed)
    pub message: String,
}

impl ValidationResult {
    /// A passing result
    pub const fn passed() -> Self {
        Self {
            failed: false,
            message: String::new(),
        }
    }

    /// A failing result with a diagnostic message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            failed: true,
            message: message.into(),
        }
    }

    /// Turn a failed result into a retryable [`Error::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.failed {
            Err(Error::Validation(self.message))
        } else {
            Ok(())
        }
    }
}

/// What the merge step produced once gating succeeded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// ID of the posted comment, if one was posted
    pub comment_id: Option<u64>,
    /// Whether the pull request was actually merged (false on dry runs)
    pub merged: bool,
}
