//! Rota GitHub - GitHub integration for reviewer rotation
//!
//! This crate reads pull request state and requests reviewers through the
//! GitHub REST API, and plugs both into `rota_core::ReviewHost`.

mod client;
mod error;
mod host;
mod pr;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use pr::PullRequest;
