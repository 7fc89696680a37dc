//! Reviewer selection
//!
//! For each group in the quota (sorted by name) the selector takes today's
//! eligible pool, removes the PR author, credits reviewers that are already
//! requested, and draws the remainder uniformly without replacement. A name
//! picked for one group is not picked again for a later group.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::availability::AvailabilityIndex;
use crate::config::{Config, ShortfallPolicy};
use crate::reviewer::{day_key, Reviewer};

/// The parts of a pull request that drive selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    /// Login of the PR author
    pub author: String,
    /// PR title
    pub title: String,
    /// Logins already requested for review
    pub requested_reviewers: Vec<String>,
    /// Whether the PR is a draft
    pub draft: bool,
}

impl PrSnapshot {
    /// Create a snapshot for a ready PR with no requested reviewers
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the already-requested reviewers
    pub fn with_requested(
        mut self,
        reviewers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.requested_reviewers = reviewers.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the PR as a draft
    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Whether the title marks the PR as work in progress
    pub fn is_wip(&self) -> bool {
        self.title.contains("WIP") || self.title.contains("wip")
    }

    fn is_author(&self, name: &str) -> bool {
        self.author.eq_ignore_ascii_case(name)
    }

    fn is_requested(&self, name: &str) -> bool {
        self.requested_reviewers
            .iter()
            .any(|r| r.eq_ignore_ascii_case(name))
    }
}

/// Why a PR gets no reviewers at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The PR could not be found
    NotFound,
    /// The PR is a draft
    Draft,
    /// The title contains `WIP` or `wip`
    WorkInProgress,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "pull request not found"),
            SkipReason::Draft => write!(f, "pull request is a draft"),
            SkipReason::WorkInProgress => write!(f, "pull request title is marked WIP"),
        }
    }
}

/// Check the skip policy for a (possibly missing) PR
pub fn skip_reason(pr: Option<&PrSnapshot>) -> Option<SkipReason> {
    match pr {
        None => Some(SkipReason::NotFound),
        Some(pr) if pr.draft => Some(SkipReason::Draft),
        Some(pr) if pr.is_wip() => Some(SkipReason::WorkInProgress),
        Some(_) => None,
    }
}

/// A group that could not be filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Group name
    pub group: String,
    /// How many new reviewers the group still needed
    pub needed: u32,
    /// How many of those could not be found
    pub missing: u32,
}

/// Result of one selection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen reviewer names, grouped in quota order, no duplicates
    pub reviewers: Vec<String>,
    /// Groups left short of their quota
    pub shortfalls: Vec<Shortfall>,
}

impl Selection {
    /// Whether nobody was chosen
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

/// Draws reviewers for a PR from an availability index and a quota
#[derive(Debug, Clone)]
pub struct Selector<'a> {
    index: AvailabilityIndex<'a>,
    quota: &'a BTreeMap<String, u32>,
    policy: ShortfallPolicy,
}

impl<'a> Selector<'a> {
    /// Create a selector that accepts shortfalls
    pub fn new(reviewers: &'a [Reviewer], quota: &'a BTreeMap<String, u32>) -> Self {
        Self {
            index: AvailabilityIndex::build_with_groups(
                reviewers,
                quota.keys().map(String::as_str),
            ),
            quota,
            policy: ShortfallPolicy::default(),
        }
    }

    /// Create a selector from a loaded config
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.reviewers, &config.quota).with_policy(config.selection.shortfall)
    }

    /// Set the shortfall policy
    pub fn with_policy(mut self, policy: ShortfallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The underlying availability index
    pub fn index(&self) -> &AvailabilityIndex<'a> {
        &self.index
    }

    /// Choose reviewers for `pr` on `today`
    pub fn select<R: Rng + ?Sized>(
        &self,
        pr: &PrSnapshot,
        today: Weekday,
        rng: &mut R,
    ) -> Selection {
        let mut selection = Selection::default();

        for (group, &required) in self.quota {
            let pool: Vec<&str> = self
                .index
                .eligible_names(group, today)
                .into_iter()
                .filter(|name| !pr.is_author(name))
                .collect();

            let satisfied = pr
                .requested_reviewers
                .iter()
                .filter(|r| pool.iter().any(|name| name.eq_ignore_ascii_case(r)))
                .count();
            let satisfied = u32::try_from(satisfied).unwrap_or(u32::MAX);

            let needed = required.saturating_sub(satisfied);
            if needed == 0 {
                debug!(group = %group, required, satisfied, "Quota already satisfied");
                continue;
            }

            let mut picked: Vec<&str> = Vec::new();
            self.draw(&pool, pr, &selection.reviewers, &mut picked, needed, rng);

            if self.policy == ShortfallPolicy::Rollover {
                let mut day = today;
                for _ in 1..7 {
                    if picked.len() >= needed as usize {
                        break;
                    }
                    day = day.succ();
                    let next_pool = self.index.eligible_names(group, day);
                    let before = picked.len();
                    self.draw(&next_pool, pr, &selection.reviewers, &mut picked, needed, rng);
                    if picked.len() > before {
                        debug!(
                            group = %group,
                            day = day_key(day),
                            added = picked.len() - before,
                            "Rolled over into a later day"
                        );
                    }
                }
            }

            let missing = needed - u32::try_from(picked.len()).unwrap_or(needed);
            if missing > 0 {
                warn!(
                    group = %group,
                    day = day_key(today),
                    needed,
                    missing,
                    "Not enough eligible reviewers to fill quota"
                );
                selection.shortfalls.push(Shortfall {
                    group: group.clone(),
                    needed,
                    missing,
                });
            }

            debug!(group = %group, picked = ?picked, "Selected reviewers for group");
            selection.reviewers.extend(picked.into_iter().map(str::to_string));
        }

        info!(
            day = day_key(today),
            count = selection.reviewers.len(),
            "Reviewer selection complete"
        );

        selection
    }

    /// Draw from `pool` into `picked` until it holds `needed` names
    ///
    /// Which names are drawn is random; the drawn names keep their roster
    /// order.
    fn draw<R: Rng + ?Sized>(
        &self,
        pool: &[&'a str],
        pr: &PrSnapshot,
        already_chosen: &[String],
        picked: &mut Vec<&'a str>,
        needed: u32,
        rng: &mut R,
    ) {
        let want = (needed as usize).saturating_sub(picked.len());
        if want == 0 {
            return;
        }

        let candidates: Vec<&'a str> = pool
            .iter()
            .copied()
            .filter(|name| !pr.is_author(name) && !pr.is_requested(name))
            .filter(|name| !already_chosen.iter().any(|c| c.eq_ignore_ascii_case(name)))
            .filter(|name| !picked.iter().any(|p| p.eq_ignore_ascii_case(name)))
            .collect();

        let mut drawn: Vec<&'a str> = candidates.choose_multiple(rng, want).copied().collect();
        drawn.sort_by_key(|name| candidates.iter().position(|c| c == name));
        picked.extend(drawn);
    }
}
