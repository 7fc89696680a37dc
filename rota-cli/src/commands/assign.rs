//! Assign command - request reviewers on a pull request

use anyhow::Context;
use chrono::Weekday;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rota_core::{assign_reviewers, day_key, AssignOutcome, Config, PullRequestRef};
use rota_github::GitHubClient;

use super::{parse_day, today};

/// Arguments for the assign command
#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Repository as owner/repo or a GitHub URL
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repo: Option<String>,

    /// Pull request number (defaults to the number in GITHUB_REF)
    #[arg(long)]
    pub pr: Option<u64>,

    /// Ref of the triggering event, e.g. refs/pull/42/merge
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API endpoint (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Select as if it were this weekday (defaults to today)
    #[arg(long, value_parser = parse_day)]
    pub day: Option<Weekday>,

    /// Select reviewers but do not request them
    #[arg(long)]
    pub dry_run: bool,
}

impl AssignArgs {
    /// Resolve the pull request this run acts on
    pub fn target(&self) -> anyhow::Result<PullRequestRef> {
        let repo = self
            .repo
            .as_deref()
            .context("No repository given; pass --repo or set GITHUB_REPOSITORY")?;

        let target = match (self.pr, self.git_ref.as_deref()) {
            (Some(number), _) => PullRequestRef::from_repository(repo, number)?,
            (None, Some(git_ref)) => PullRequestRef::from_github_env(repo, git_ref)?,
            (None, None) => {
                anyhow::bail!("No pull request given; pass --pr or set GITHUB_REF")
            }
        };

        Ok(target)
    }

    /// Execute the assign command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let target = self.target()?;
        let day = self.day.unwrap_or_else(today);

        if verbose {
            tracing::info!(
                pr = %target,
                day = day_key(day),
                shortfall = %config.selection.shortfall,
                dry_run = self.dry_run,
                "Starting reviewer assignment"
            );
        }

        let client = GitHubClient::for_pull_request(
            &target,
            self.token.clone().unwrap_or_default(),
            self.api_url.as_deref(),
        )?;

        let mut rng = StdRng::from_entropy();
        let outcome =
            assign_reviewers(&client, &target, config, day, &mut rng, self.dry_run).await?;

        match outcome {
            AssignOutcome::Skipped { reason } => {
                println!("Skipped {}: {}", target, reason);
            }
            AssignOutcome::NothingToRequest => {
                println!("No reviewers to request on {}", target);
            }
            AssignOutcome::DryRun { reviewers } => {
                println!("[Dry run] Would request on {}: {}", target, reviewers.join(", "));
            }
            AssignOutcome::Requested { reviewers } => {
                println!("Requested on {}: {}", target, reviewers.join(", "));
            }
        }

        Ok(())
    }
}
