//! Merge command - gate, comment and merge one pull request

use crate::cli::context::MergeContext;
use crate::cli::style::{CHECK, CROSS, Stylize};
use anstream::println;
use pr_automerge::config::MergeConfig;
use pr_automerge::error::{Error, Result};
use pr_automerge::merge::{MergeObserver, MergeOrchestrator, TracingObserver};
use pr_automerge::output::ActionOutput;
use pr_automerge::types::MergeOutcome;
use std::sync::OnceLock;

/// Logs through [`TracingObserver`] and remembers the posted comment
#[derive(Debug, Default)]
struct StepObserver {
    inner: TracingObserver,
    comment_id: OnceLock<u64>,
}

impl StepObserver {
    fn comment_id(&self) -> Option<u64> {
        self.comment_id.get().copied()
    }
}

impl MergeObserver for StepObserver {
    fn on_attempt(&self, attempt: u32, error: &Error) {
        self.inner.on_attempt(attempt, error);
    }

    fn on_comment(&self, comment_id: u64) {
        // At most one comment per run
        let _ = self.comment_id.set(comment_id);
        self.inner.on_comment(comment_id);
    }

    fn on_outcome(&self, outcome: &MergeOutcome) {
        self.inner.on_outcome(outcome);
    }

    fn on_skipped(&self, error: &Error) {
        self.inner.on_skipped(error);
    }
}

/// Run the merge command
///
/// `commentID` is written whenever a comment went out, even if the merge
/// failed afterwards. `merged` is written only when gating succeeded. A soft
/// exit before any side effect writes nothing.
pub async fn run_merge(ctx: MergeContext) -> Result<()> {
    let config = &ctx.config.merge;
    let observer = StepObserver::default();
    let orchestrator = MergeOrchestrator::new(config, ctx.platform.as_ref(), &observer)?;

    println!(
        "{}",
        format!(
            "Waiting on PR #{} in {}/{} (every {}s, up to {}s)...",
            config.pull_number,
            config.owner,
            config.repo,
            config.retry.interval().as_secs(),
            config.retry.timeout().as_secs()
        )
        .muted()
    );

    let result = orchestrator.merge().await;
    let written = write_outputs(
        &ActionOutput::from_env(),
        observer.comment_id(),
        result.as_ref().ok().and_then(Option::as_ref),
    );
    // A merge error wins over an output write error
    let outcome = result?;
    written?;

    if let Some(id) = observer.comment_id() {
        println!("{} Posted comment {}", CHECK.success(), id.accent());
    }
    match outcome {
        Some(outcome) => print_summary(config, &outcome),
        None => {
            println!(
                "{} {}",
                CROSS.warn(),
                format!("PR #{} was not merged", config.pull_number).warn()
            );
        }
    }

    Ok(())
}

fn write_outputs(
    output: &ActionOutput,
    comment_id: Option<u64>,
    outcome: Option<&MergeOutcome>,
) -> Result<()> {
    if let Some(id) = comment_id {
        output.write_comment_id(id)?;
    }
    if let Some(outcome) = outcome {
        output.write_merged(outcome.merged)?;
    }
    Ok(())
}

fn print_summary(config: &MergeConfig, outcome: &MergeOutcome) {
    if outcome.merged {
        println!(
            "{} {} {}",
            CHECK.success(),
            format!("Merged PR #{}", config.pull_number).emphasis(),
            format!("({})", config.merge_method()).muted()
        );
    } else {
        println!(
            "{} {}",
            CHECK.success(),
            format!("PR #{} is ready; dry run, merge skipped", config.pull_number).emphasis()
        );
    }
}
