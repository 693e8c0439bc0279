//! Git-hosting platform service
//!
//! The merge gate only talks to the remote through [`PlatformService`], so
//! tests can swap in a mock and the real GitHub client stays a thin wrapper.

mod github;

pub use github::GitHubService;

use crate::config::ActionConfig;
use crate::error::{Error, Result};
use crate::types::{
    CheckRunList, IssueComment, MergeMethod, MergeResult, PullRequest,
};
use async_trait::async_trait;

/// Platform service trait for the pull request operations the merge gate uses
///
/// Every call may fail with a transport or authorization error. Callers
/// treat all of them the same way.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch a pull request by number
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest>;

    /// List every check run reported for a git ref (sha, branch or tag)
    async fn list_checks_for_ref(&self, git_ref: &str) -> Result<CheckRunList>;

    /// Post a comment on the issue thread of a pull request
    async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<IssueComment>;

    /// Merge a pull request with the given method
    async fn merge_pull_request(&self, pr_number: u64, method: MergeMethod)
    -> Result<MergeResult>;
}

/// Split an `owner/repo` string such as `GITHUB_REPOSITORY`
pub fn parse_repository(full_name: &str) -> Result<(String, String)> {
    match full_name.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository '{full_name}', expected owner/repo"
        ))),
    }
}

/// Create the GitHub service for an invocation
pub fn create_platform_service(config: &ActionConfig) -> Result<Box<dyn PlatformService>> {
    let service = GitHubService::new(
        config.token.expose(),
        config.merge.owner.clone(),
        config.merge.repo.clone(),
        config.api_url.clone(),
    )?;
    Ok(Box::new(service))
}
