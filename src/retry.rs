//! Bounded-duration retry loop
//!
//! [`RetryEngine::exec`] runs an async operation repeatedly, sleeping a fixed
//! interval between attempts, until the operation reports success or the
//! total time budget is spent. The engine knows nothing about pull requests;
//! the merge gate in [`crate::merge`] is built on top of it.
//!
//! Every attempt reports back through the typed [`Attempt`] value rather than
//! through a bare `Result`, so "try again" and "stop now" are distinct.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Timing and failure policy for one [`RetryEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    timeout: Duration,
    interval: Duration,
    fail_step: bool,
}

impl RetryPolicy {
    /// Start building a policy; timeout and interval are mandatory
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Total time budget, measured from the start of `exec`
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pause between a failed attempt and the next one
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether running out of time is an error for the caller
    pub const fn fail_step(&self) -> bool {
        self.fail_step
    }
}

/// Builder for [`RetryPolicy`]
///
/// `build` refuses to produce a policy unless both the timeout and the
/// interval were set. There is no fallback value for either.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicyBuilder {
    timeout: Option<Duration>,
    interval: Option<Duration>,
    fail_step: bool,
}

impl RetryPolicyBuilder {
    /// Total time budget in seconds
    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Interval between attempts in seconds
    #[must_use]
    pub const fn interval_secs(mut self, secs: u64) -> Self {
        self.interval = Some(Duration::from_secs(secs));
        self
    }

    /// Whether a timeout should be surfaced as an error
    #[must_use]
    pub const fn fail_step(mut self, fail_step: bool) -> Self {
        self.fail_step = fail_step;
        self
    }

    /// Validate and produce the policy
    pub fn build(self) -> Result<RetryPolicy> {
        let timeout = self
            .timeout
            .ok_or_else(|| Error::Config("retry timeout is not set".to_string()))?;
        let interval = self
            .interval
            .ok_or_else(|| Error::Config("retry interval is not set".to_string()))?;

        Ok(RetryPolicy {
            timeout,
            interval,
            fail_step: self.fail_step,
        })
    }
}

/// What a single attempt tells the engine
#[derive(Debug)]
pub enum Attempt<T> {
    /// The operation succeeded; stop and hand back the value
    Done(T),
    /// The operation failed; try again if there is time left
    Retry(Error),
    /// The operation failed in a way that must not be retried
    Abort(Error),
}

impl<T> From<Result<T>> for Attempt<T> {
    /// Every error is retryable; there is no error-kind discrimination here.
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(e) => Self::Retry(e),
        }
    }
}

/// Terminal state of a completed `exec` call
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// An attempt succeeded
    Succeeded {
        /// Value produced by the successful attempt
        value: T,
        /// Number of attempts made, including the successful one
        attempts: u32,
    },
    /// The deadline passed and fail-step is disabled
    TimedOut {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last_error: Error,
    },
}

impl<T> RetryOutcome<T> {
    /// Number of attempts made before reaching this state
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts, .. } | Self::TimedOut { attempts, .. } => *attempts,
        }
    }

    /// Whether the loop ended on a successful attempt
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Repeats an operation until it succeeds or the time budget runs out
#[derive(Debug, Clone, Copy)]
pub struct RetryEngine {
    policy: RetryPolicy,
}

impl RetryEngine {
    /// Create an engine with the given policy
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Run `operation` until it returns [`Attempt::Done`] or time runs out
    ///
    /// The deadline is fixed once, when `exec` starts. Attempts are numbered
    /// from 1 and the counter lives only for this call. A failed attempt is
    /// followed by a sleep of one interval unless the deadline has passed or
    /// the next attempt would start after it, so an operation that always
    /// fails runs `timeout / interval + 1` times (once when the timeout is
    /// shorter than the interval). An attempt in flight is always awaited to
    /// completion.
    ///
    /// # Returns
    /// - `Ok(Succeeded)` as soon as an attempt succeeds
    /// - `Ok(TimedOut)` when the deadline passes and fail-step is off
    /// - `Err(RetryExhausted)` when the deadline passes and fail-step is on
    /// - `Err(Aborted)` when an attempt returns [`Attempt::Abort`]
    pub async fn exec<T, F, Fut>(&self, mut operation: F) -> Result<RetryOutcome<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        // `None` only when the timeout overflows the clock, i.e. no deadline
        let deadline = Instant::now().checked_add(self.policy.timeout);
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);

            let error = match operation(attempt).await {
                Attempt::Done(value) => {
                    return Ok(RetryOutcome::Succeeded {
                        value,
                        attempts: attempt,
                    });
                }
                Attempt::Abort(e) => {
                    return Err(Error::Aborted {
                        attempt,
                        source: Box::new(e),
                    });
                }
                Attempt::Retry(e) => e,
            };

            // Never start an attempt after the deadline
            let now = Instant::now();
            let out_of_time = deadline.is_some_and(|deadline| {
                now >= deadline
                    || now
                        .checked_add(self.policy.interval)
                        .is_none_or(|next| next > deadline)
            });
            if out_of_time {
                if self.policy.fail_step {
                    return Err(Error::RetryExhausted {
                        attempts: attempt,
                        source: Box::new(error),
                    });
                }
                return Ok(RetryOutcome::TimedOut {
                    attempts: attempt,
                    last_error: error,
                });
            }

            debug!(
                attempt,
                interval_secs = self.policy.interval.as_secs(),
                "attempt failed, waiting before next attempt"
            );

            if self.policy.interval.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(self.policy.interval).await;
            }
        }
    }
}
