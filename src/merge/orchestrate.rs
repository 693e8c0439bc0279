//! Merge orchestration - effectful operations
//!
//! Drives the gating predicates through [`RetryEngine`] and, once they hold,
//! posts the optional comment and performs the merge. Every attempt re-reads
//! the pull request and its check runs; nothing is cached between attempts.

use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::merge::observer::MergeObserver;
use crate::merge::validate::{validate_check_status, validate_title};
use crate::platform::PlatformService;
use crate::retry::{Attempt, RetryEngine, RetryOutcome};
use crate::types::MergeOutcome;
use tracing::debug;

/// Gates and merges a single pull request
pub struct MergeOrchestrator<'a> {
    config: &'a MergeConfig,
    platform: &'a dyn PlatformService,
    observer: &'a dyn MergeObserver,
}

impl<'a> MergeOrchestrator<'a> {
    /// Create an orchestrator, validating the configuration first
    pub fn new(
        config: &'a MergeConfig,
        platform: &'a dyn PlatformService,
        observer: &'a dyn MergeObserver,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            platform,
            observer,
        })
    }

    /// Wait for the gates, then comment and merge
    ///
    /// # Returns
    /// - `Ok(Some(outcome))` when gating succeeded and the side effects ran
    /// - `Ok(None)` when the run gave up and fail-step is disabled; nothing
    ///   was posted or merged after the gate and no outputs should be set
    /// - `Err(_)` when the run gave up and fail-step is enabled
    pub async fn merge(&self) -> Result<Option<MergeOutcome>> {
        match self.run().await {
            Ok(Some(outcome)) => {
                self.observer.on_outcome(&outcome);
                Ok(Some(outcome))
            }
            Ok(None) => Ok(None),
            Err(e) if self.config.fail_step() => Err(e),
            Err(e) => {
                self.observer.on_skipped(&e);
                Ok(None)
            }
        }
    }

    async fn run(&self) -> Result<Option<MergeOutcome>> {
        let engine = RetryEngine::new(self.config.retry);

        match engine.exec(move |attempt| self.attempt(attempt)).await? {
            RetryOutcome::Succeeded { attempts, .. } => {
                debug!(attempts, pr_number = self.config.pull_number, "merge gate passed");
            }
            RetryOutcome::TimedOut {
                attempts,
                last_error,
            } => {
                // Only reachable with fail-step off; the engine errors otherwise
                self.observer.on_skipped(&Error::RetryExhausted {
                    attempts,
                    source: Box::new(last_error),
                });
                return Ok(None);
            }
        }

        self.apply().await.map(Some)
    }

    /// One gate evaluation; every failure is retryable
    async fn attempt(&self, attempt: u32) -> Attempt<()> {
        match self.check_ready().await {
            Ok(()) => Attempt::Done(()),
            Err(e) => {
                self.observer.on_attempt(attempt, &e);
                Attempt::Retry(e)
            }
        }
    }

    async fn check_ready(&self) -> Result<()> {
        let pr = self
            .platform
            .get_pull_request(self.config.pull_number)
            .await?;
        validate_title(&pr, &self.config.title_marker).into_result()?;

        if self.config.check_status {
            let checks = self.platform.list_checks_for_ref(&self.config.sha).await?;
            debug!(
                total = checks.total_count,
                succeeded = checks.passing_count(),
                "fetched check runs"
            );
            validate_check_status(&checks, &self.config.check_exclusion).into_result()?;
        }

        Ok(())
    }

    /// Side effects, in order: comment, then merge
    async fn apply(&self) -> Result<MergeOutcome> {
        let pr_number = self.config.pull_number;

        let comment_id = match self.config.comment_body() {
            Some(body) => {
                let comment = self.platform.create_issue_comment(pr_number, body).await?;
                self.observer.on_comment(comment.id);
                Some(comment.id)
            }
            None => None,
        };

        if self.config.dry_run {
            debug!(pr_number, "dry run, not merging");
            return Ok(MergeOutcome {
                comment_id,
                merged: false,
            });
        }

        let result = self
            .platform
            .merge_pull_request(pr_number, self.config.merge_method())
            .await?;
        if !result.merged {
            return Err(Error::MergeRejected(
                result
                    .message
                    .unwrap_or_else(|| format!("PR #{pr_number} was not merged")),
            ));
        }

        Ok(MergeOutcome {
            comment_id,
            merged: true,
        })
    }
}
