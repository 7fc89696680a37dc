//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// GitHub rejected the review request
    #[error("Could not request reviewers on #{number}: {message}")]
    ReviewRequest {
        /// Pull request number
        number: u64,
        /// Message returned by GitHub
        message: String,
    },
}

impl From<Error> for rota_core::Error {
    fn from(err: Error) -> Self {
        rota_core::Error::Host(err.to_string())
    }
}
