//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckRunList, IssueComment, MergeMethod, MergeResult, PullRequest,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use tracing::debug;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";
const CHECK_RUNS_PER_PAGE: u32 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    owner: String,
    repo: String,
    /// Token for raw HTTP requests (check runs)
    token: String,
    /// HTTP client for raw requests (check runs)
    http_client: Client,
    /// API base URL without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the REST base URL, e.g. `https://ghe.example.com/api/v3`.
    pub fn new(
        token: &str,
        owner: String,
        repo: String,
        api_url: Option<String>,
    ) -> Result<Self> {
        let api_base = match api_url.as_deref() {
            Some(raw) => {
                let parsed = Url::parse(raw)
                    .map_err(|e| Error::Config(format!("invalid API URL '{raw}': {e}")))?;
                parsed.as_str().trim_end_matches('/').to_string()
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("pr-automerge")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            owner,
            repo,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Fetch one page of check runs
    async fn fetch_check_runs_page(&self, git_ref: &str, page: u32) -> Result<CheckRunList> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs",
            self.api_base,
            self.owner,
            self.repo,
            urlencoding::encode(git_ref)
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("per_page", CHECK_RUNS_PER_PAGE), ("page", page)])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch check runs: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GitHubApi(format!(
                "Check runs request for {git_ref} returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        id: pr.id.0,
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .get(pr_number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number, title = %result.title, "got PR");
        Ok(result)
    }

    async fn list_checks_for_ref(&self, git_ref: &str) -> Result<CheckRunList> {
        debug!(git_ref, "listing check runs");
        let mut page = 1;
        let mut first = self.fetch_check_runs_page(git_ref, page).await?;

        // Keep paging until we hold every run the API says exists
        while (first.check_runs.len() as u64) < first.total_count {
            page += 1;
            let next = self.fetch_check_runs_page(git_ref, page).await?;
            if next.check_runs.is_empty() {
                break;
            }
            first.check_runs.extend(next.check_runs);
        }

        debug!(
            git_ref,
            total = first.total_count,
            fetched = first.check_runs.len(),
            "listed check runs"
        );
        Ok(first)
    }

    async fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<IssueComment> {
        debug!(issue_number, "creating comment");
        let comment = self
            .client
            .issues(&self.owner, &self.repo)
            .create_comment(issue_number, body)
            .await?;

        let result = IssueComment { id: comment.id.0 };
        debug!(issue_number, comment_id = result.id, "created comment");
        Ok(result)
    }

    async fn merge_pull_request(
        &self,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.owner, &self.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
