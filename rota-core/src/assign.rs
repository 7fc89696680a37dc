//! One reviewer-assignment run against a review host
//!
//! The run fetches the PR once, applies the skip policy, selects reviewers
//! and, when anyone was selected, requests them once. Host failures
//! propagate; nothing is retried.

use async_trait::async_trait;
use chrono::Weekday;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::context::PullRequestRef;
use crate::selector::{skip_reason, PrSnapshot, Selector, SkipReason};
use crate::Result;

/// A code host that can report PR state and request reviewers
#[async_trait]
pub trait ReviewHost: Send + Sync {
    /// Fetch the PR, or `None` if it does not exist
    async fn fetch_pull_request(&self, target: &PullRequestRef) -> Result<Option<PrSnapshot>>;

    /// Request reviews from `reviewers`
    async fn request_reviewers(&self, target: &PullRequestRef, reviewers: &[String]) -> Result<()>;
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignOutcome {
    /// The skip policy matched
    Skipped {
        /// Why the PR was skipped
        reason: SkipReason,
    },
    /// Selection produced no names, so no request was made
    NothingToRequest,
    /// Reviewers were chosen but not requested
    DryRun {
        /// Chosen reviewers
        reviewers: Vec<String>,
    },
    /// Reviewers were requested on the host
    Requested {
        /// Requested reviewers
        reviewers: Vec<String>,
    },
}

/// Run one assignment for `target`
pub async fn assign_reviewers<H, R>(
    host: &H,
    target: &PullRequestRef,
    config: &Config,
    today: Weekday,
    rng: &mut R,
    dry_run: bool,
) -> Result<AssignOutcome>
where
    H: ReviewHost + ?Sized,
    R: Rng + ?Sized,
{
    let pr = host.fetch_pull_request(target).await?;

    if let Some(reason) = skip_reason(pr.as_ref()) {
        info!(pr = %target, %reason, "Skipping reviewer assignment");
        return Ok(AssignOutcome::Skipped { reason });
    }
    let Some(pr) = pr else {
        return Ok(AssignOutcome::Skipped {
            reason: SkipReason::NotFound,
        });
    };

    let selection = Selector::from_config(config).select(&pr, today, rng);

    if selection.is_empty() {
        info!(pr = %target, "No reviewers selected; nothing to request");
        return Ok(AssignOutcome::NothingToRequest);
    }

    if dry_run {
        info!(pr = %target, reviewers = ?selection.reviewers, "Dry run; not requesting reviewers");
        return Ok(AssignOutcome::DryRun {
            reviewers: selection.reviewers,
        });
    }

    host.request_reviewers(target, &selection.reviewers).await?;
    info!(pr = %target, reviewers = ?selection.reviewers, "Requested reviewers");

    Ok(AssignOutcome::Requested {
        reviewers: selection.reviewers,
    })
}
