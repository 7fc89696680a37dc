//! `ReviewHost` implementation for GitHub

use async_trait::async_trait;
use rota_core::{PrSnapshot, PullRequestRef, ReviewHost};
use tracing::info;

use crate::GitHubClient;

impl GitHubClient {
    fn check_target(&self, target: &PullRequestRef) -> rota_core::Result<()> {
        if self.serves(target) {
            Ok(())
        } else {
            Err(rota_core::Error::Context(format!(
                "Client for {}/{} cannot act on {}",
                self.owner(),
                self.repo(),
                target
            )))
        }
    }
}

#[async_trait]
impl ReviewHost for GitHubClient {
    async fn fetch_pull_request(
        &self,
        target: &PullRequestRef,
    ) -> rota_core::Result<Option<PrSnapshot>> {
        self.check_target(target)?;

        let pr = self.find_pr(target.number).await?;
        if pr.is_none() {
            info!(pr = %target, "Pull request not found");
        }
        Ok(pr.map(PrSnapshot::from))
    }

    async fn request_reviewers(
        &self,
        target: &PullRequestRef,
        reviewers: &[String],
    ) -> rota_core::Result<()> {
        self.check_target(target)?;
        self.request_reviews(target.number, reviewers).await?;
        Ok(())
    }
}
