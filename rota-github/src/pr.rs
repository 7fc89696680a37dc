//! Pull request lookup and review requests

use crate::{Error, GitHubClient, Result};
use octocrab::models::pulls::PullRequest as OctocrabPR;
use rota_core::PrSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

/// Pull request representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author login
    pub author: String,
    /// Whether the PR is a draft
    pub draft: bool,
    /// Users with a pending review request
    pub requested_reviewers: Vec<String>,
}

impl From<OctocrabPR> for PullRequest {
    fn from(pr: OctocrabPR) -> Self {
        PullRequest {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            author: pr.user.map(|u| u.login).unwrap_or_default(),
            draft: pr.draft.unwrap_or(false),
            requested_reviewers: pr
                .requested_reviewers
                .unwrap_or_default()
                .into_iter()
                .map(|u| u.login)
                .collect(),
        }
    }
}

impl From<PullRequest> for PrSnapshot {
    fn from(pr: PullRequest) -> Self {
        PrSnapshot {
            author: pr.author,
            title: pr.title,
            requested_reviewers: pr.requested_reviewers,
            draft: pr.draft,
        }
    }
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.message.contains("Not Found"))
}

impl GitHubClient {
    /// Get a pull request by number
    pub async fn get_pr(&self, number: u64) -> Result<PullRequest> {
        debug!(number, "Fetching pull request");

        let pr = self
            .client()
            .pulls(self.owner(), self.repo())
            .get(number)
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    Error::PrNotFound(number)
                } else {
                    Error::Api(e)
                }
            })?;

        Ok(pr.into())
    }

    /// Get a pull request, mapping "not found" to `None`
    pub async fn find_pr(&self, number: u64) -> Result<Option<PullRequest>> {
        match self.get_pr(number).await {
            Ok(pr) => Ok(Some(pr)),
            Err(Error::PrNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Request reviews from the given users
    pub async fn request_reviews(&self, number: u64, reviewers: &[String]) -> Result<()> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            self.owner(),
            self.repo(),
            number
        );
        let body = json!({ "reviewers": reviewers });

        let response: serde_json::Value = self
            .client()
            .post(route, Some(&body))
            .await
            .map_err(|e| match e {
                octocrab::Error::GitHub { source, .. } => Error::ReviewRequest {
                    number,
                    message: source.message,
                },
                other => Error::Api(other),
            })?;

        debug!(number, response = %response, "Review request response");
        info!(number, reviewers = ?reviewers, "Requested reviewers");

        Ok(())
    }
}
