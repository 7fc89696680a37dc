//! Identification of the pull request a run targets

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The repository and pull request a run acts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub number: u64,
}

impl PullRequestRef {
    /// Create a reference from its parts
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Build a reference from a repository string and a PR number
    pub fn from_repository(repository: &str, number: u64) -> Result<Self> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self::new(owner, repo, number))
    }

    /// Build a reference from the values GitHub Actions exposes as
    /// `GITHUB_REPOSITORY` and `GITHUB_REF`
    pub fn from_github_env(repository: &str, git_ref: &str) -> Result<Self> {
        Self::from_repository(repository, parse_pull_ref(git_ref)?)
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Extract the PR number from `refs/pull/<n>/merge` or `refs/pull/<n>/head`
pub fn parse_pull_ref(git_ref: &str) -> Result<u64> {
    let rest = git_ref.trim().strip_prefix("refs/pull/").ok_or_else(|| {
        Error::Context(format!(
            "'{}' is not a pull request ref (expected refs/pull/<number>/merge)",
            git_ref
        ))
    })?;

    let number = rest.split('/').next().unwrap_or_default();
    number
        .parse()
        .map_err(|_| Error::Context(format!("Invalid pull request number in ref '{}'", git_ref)))
}

/// Parse a repository into owner and name
///
/// Supports formats:
/// - owner/repo
/// - https://github.com/owner/repo
/// - git@github.com:owner/repo.git
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    let repository = repository.trim();
    let invalid = || {
        Error::Context(format!(
            "Invalid repository format: '{}'. Expected owner/repo",
            repository
        ))
    };

    let path = if repository.starts_with("https://") || repository.starts_with("http://") {
        let url = url::Url::parse(repository).map_err(|e| Error::Context(e.to_string()))?;
        url.path().trim_start_matches('/').to_string()
    } else if let Some(rest) = repository.strip_prefix("git@") {
        rest.split_once(':').map(|(_, p)| p.to_string()).ok_or_else(invalid)?
    } else {
        repository.to_string()
    };

    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let mut parts = path.split('/').filter(|p| !p.is_empty());
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => Ok((owner.to_string(), repo.to_string())),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let (owner, repo) = parse_repository("owner/repo").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_https_url() {
        let (owner, repo) = parse_repository("https://github.com/owner/repo.git").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("owner", "repo"));
    }

    #[test]
    fn test_parse_ssh_url() {
        let (owner, repo) = parse_repository("git@github.com:owner/repo.git").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("owner", "repo"));
    }

    #[test]
    fn test_parse_invalid_repository() {
        assert!(parse_repository("invalid").is_err());
        assert!(parse_repository("").is_err());
        assert!(parse_repository("git@github.com").is_err());
    }

    #[test]
    fn test_parse_pull_refs() {
        assert_eq!(parse_pull_ref("refs/pull/42/merge").unwrap(), 42);
        assert_eq!(parse_pull_ref("refs/pull/7/head").unwrap(), 7);
        assert!(parse_pull_ref("refs/heads/main").is_err());
        assert!(parse_pull_ref("refs/pull/abc/merge").is_err());
    }

    #[test]
    fn test_from_github_env() {
        let pr = PullRequestRef::from_github_env("acme/widgets", "refs/pull/123/merge").unwrap();
        assert_eq!(pr, PullRequestRef::new("acme", "widgets", 123));
        assert_eq!(pr.to_string(), "acme/widgets#123");
    }
}
