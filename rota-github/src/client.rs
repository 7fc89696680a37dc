//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use rota_core::PullRequestRef;
use tracing::{debug, info};

/// GitHub API client for one repository
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// `api_url` overrides the API endpoint (GitHub Enterprise); Actions
    /// exposes it as `GITHUB_API_URL`.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN or pass --token".to_string(),
            ));
        }

        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = api_url {
            debug!(api_url = %url, "Using custom GitHub API endpoint");
            builder = builder
                .base_uri(url.to_string())
                .map_err(|e| Error::Auth(format!("Invalid GitHub API URL {}: {}", url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// Create a client for the repository of `target`
    pub fn for_pull_request(
        target: &PullRequestRef,
        token: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        Self::new(target.owner.clone(), target.repo.clone(), token, api_url)
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Whether `target` points at this client's repository
    pub(crate) fn serves(&self, target: &PullRequestRef) -> bool {
        self.owner.eq_ignore_ascii_case(&target.owner)
            && self.repo.eq_ignore_ascii_case(&target.repo)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
