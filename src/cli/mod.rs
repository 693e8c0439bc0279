//! CLI command implementations

mod context;
mod merge;
mod style;

pub use context::MergeContext;
pub use merge::run_merge;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};
use pr_automerge::types::MergeMethod;

/// Inputs of the merge step
///
/// Each flag can also come from the `INPUT_*` variable GitHub Actions sets for
/// the matching action input. Boolean inputs accept `true`/`false`.
#[derive(Debug, Clone, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeArgs {
    /// Repository owner (defaults to the owner in GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,

    /// Repository name (defaults to the name in GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY", hide = true)]
    pub repository: Option<String>,

    /// Pull request number
    #[arg(long = "number", env = "INPUT_NUMBER")]
    pub pull_number: u64,

    /// Commit whose check runs must pass
    #[arg(long, env = "INPUT_SHA", default_value = "")]
    pub sha: String,

    /// Text the pull request title must contain
    #[arg(long = "title", env = "INPUT_TITLE", default_value = "")]
    pub title_marker: String,

    /// Merge strategy: merge, squash or rebase
    #[arg(long, env = "INPUT_STRATEGY", default_value = "squash")]
    pub strategy: MergeMethod,

    /// Merge with --strategy instead of always squashing
    #[arg(
        long,
        env = "INPUT_HONORSTRATEGY",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub honor_strategy: bool,

    /// Comment to post before merging
    #[arg(long, env = "INPUT_COMMENT")]
    pub comment: Option<String>,

    /// Run every gate but skip the merge itself
    #[arg(
        long,
        env = "INPUT_DRYRUN",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Wait for the other check runs on --sha to succeed
    #[arg(
        long,
        env = "INPUT_CHECKSTATUS",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub check_status: bool,

    /// Name of the check run executing this step; excluded by name when set
    #[arg(long, env = "INPUT_CHECKNAME")]
    pub check_name: Option<String>,

    /// Fail the step when gating times out or a side effect fails
    #[arg(
        long,
        env = "INPUT_FAILSTEP",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub fail_step: bool,

    /// Seconds between attempts
    #[arg(long, env = "INPUT_RETRYINTERVAL", default_value_t = 10)]
    pub interval: u64,

    /// Seconds before giving up
    #[arg(long, env = "INPUT_TIMEOUT", default_value_t = 600)]
    pub timeout: u64,

    /// GitHub token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}
