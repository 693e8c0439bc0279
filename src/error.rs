//! Error types for pr-automerge

use thiserror::Error;

/// Errors produced while gating and merging a pull request
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API request failed (transport, authorization or decoding)
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// A gating predicate did not hold on this attempt
    #[error("{0}")]
    Validation(String),

    /// The retry deadline passed while the last attempt was still failing
    #[error("gave up after {attempts} attempt(s): {source}")]
    RetryExhausted {
        /// Number of attempts made before the deadline
        attempts: u32,
        /// Error returned by the final attempt
        #[source]
        source: Box<Error>,
    },

    /// An attempt asked the retry loop to stop immediately
    #[error("aborted on attempt {attempt}: {source}")]
    Aborted {
        /// Attempt that requested the abort
        attempt: u32,
        /// Reason given by the attempt
        #[source]
        source: Box<Error>,
    },

    /// The merge endpoint answered but did not merge the pull request
    #[error("merge rejected: {0}")]
    MergeRejected(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    /// octocrab renders a captured backtrace after the message; keep only the
    /// first line so per-attempt warnings and annotations stay single-line.
    fn from(e: octocrab::Error) -> Self {
        match e {
            octocrab::Error::GitHub { source, .. } => {
                Self::GitHubApi(format!("{} ({})", source.message, source.status_code))
            }
            other => Self::GitHubApi(
                other
                    .to_string()
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            ),
        }
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
