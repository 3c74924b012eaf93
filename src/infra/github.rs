use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, USER_AGENT},
};
use tracing::debug;

use crate::domain::file_change::FileChange;
use crate::error::{AppError, AppResult};
use crate::services::{PullRequestRef, PullRequestService};

const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("chart-bump/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(api_base_url: String, per_page: u32) -> Self {
        Self {
            http: Client::new(),
            api_base_url,
            per_page,
        }
    }

    fn files_endpoint(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/pulls/{}/files",
            self.api_base_url.trim_end_matches('/'),
            pr.repo,
            pr.number
        )
    }
}

#[async_trait]
impl PullRequestService for GitHubClient {
    async fn list_files_page(&self, pr: &PullRequestRef, page: u32) -> AppResult<Vec<FileChange>> {
        let url = self.files_endpoint(pr);
        debug!(%url, page, "requesting changed files");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, GITHUB_V3_MEDIA_TYPE)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(&[("page", page), ("per_page", self.per_page)])
            .send()
            .await
            .map_err(|err| AppError::PullRequest(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::PullRequest(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        response.json::<Vec<FileChange>>().await.map_err(|err| {
            AppError::PullRequest(format!("failed to parse GitHub response: {err}"))
        })
    }
}
