//! Error types for reviewer rotation

use thiserror::Error;

/// Result type alias for rota operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for rota operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The repository or pull request could not be identified
    #[error("Execution context error: {0}")]
    Context(String),

    /// The review host (e.g. GitHub) failed a fetch or request call
    #[error("Review host error: {0}")]
    Host(String),
}
