//! Command context for the merge step
//!
//! Turns parsed inputs into a validated configuration and the platform
//! service it runs against.

use crate::cli::MergeArgs;
use pr_automerge::config::{ActionConfig, CheckExclusion, Credential, MergeConfig};
use pr_automerge::error::{Error, Result};
use pr_automerge::platform::{PlatformService, create_platform_service, parse_repository};
use pr_automerge::retry::RetryPolicy;

/// Everything the merge command needs
pub struct MergeContext {
    /// Validated configuration
    pub config: ActionConfig,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl MergeContext {
    /// Build the configuration and create the platform service
    pub fn new(args: MergeArgs) -> Result<Self> {
        let fallback_token = std::env::var("GITHUB_TOKEN").ok();
        let config = build_config(args, fallback_token)?;
        let platform = create_platform_service(&config)?;
        Ok(Self { config, platform })
    }
}

/// Assemble and validate an [`ActionConfig`]
fn build_config(args: MergeArgs, fallback_token: Option<String>) -> Result<ActionConfig> {
    let (owner, repo) = resolve_repository(&args)?;

    let token = args
        .token
        .filter(|t| !t.is_empty())
        .or(fallback_token)
        .ok_or_else(|| Error::Config("no token given (set INPUT_TOKEN or GITHUB_TOKEN)".to_string()))?;

    let retry = RetryPolicy::builder()
        .timeout_secs(args.timeout)
        .interval_secs(args.interval)
        .fail_step(args.fail_step)
        .build()?;

    let check_exclusion = match args.check_name.filter(|n| !n.trim().is_empty()) {
        Some(name) => CheckExclusion::Named(name),
        None => CheckExclusion::SelfRun,
    };

    let merge = MergeConfig {
        owner,
        repo,
        pull_number: args.pull_number,
        sha: args.sha,
        title_marker: args.title_marker,
        strategy: args.strategy,
        honor_strategy: args.honor_strategy,
        comment: args.comment,
        dry_run: args.dry_run,
        check_status: args.check_status,
        check_exclusion,
        retry,
    };
    merge.validate()?;

    Ok(ActionConfig {
        merge,
        token: Credential::new(token)?,
        api_url: args.api_url.filter(|u| !u.is_empty()),
    })
}

/// Explicit owner/repo win over `GITHUB_REPOSITORY`
fn resolve_repository(args: &MergeArgs) -> Result<(String, String)> {
    let from_env = args
        .repository
        .as_deref()
        .map(parse_repository)
        .transpose()?;

    let owner = args
        .owner
        .clone()
        .or_else(|| from_env.as_ref().map(|(o, _)| o.clone()));
    let repo = args
        .repo
        .clone()
        .or_else(|| from_env.as_ref().map(|(_, r)| r.clone()));

    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        _ => Err(Error::Config(
            "repository unknown (pass --owner and --repo or set GITHUB_REPOSITORY)".to_string(),
        )),
    }
}
