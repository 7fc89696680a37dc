//! Group × weekday availability index
//!
//! The index is rebuilt from the reviewer list for every selection. Every
//! known group gets all seven weekday cells up front, so lookups never see a
//! missing key; unknown groups read as empty.

use std::collections::BTreeMap;

use chrono::Weekday;
use tracing::debug;

use crate::reviewer::{Reviewer, WEEK};

type WeekCells<'a> = [Vec<&'a Reviewer>; 7];

/// Reviewers eligible per group and weekday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex<'a> {
    groups: BTreeMap<&'a str, WeekCells<'a>>,
}

impl<'a> AvailabilityIndex<'a> {
    /// Index reviewers by their own groups
    pub fn build(reviewers: &'a [Reviewer]) -> Self {
        Self::build_with_groups(reviewers, std::iter::empty())
    }

    /// Index reviewers, also registering `extra_groups` (e.g. quota keys)
    /// that may have no reviewers at all
    pub fn build_with_groups(
        reviewers: &'a [Reviewer],
        extra_groups: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut groups: BTreeMap<&'a str, WeekCells<'a>> = reviewers
            .iter()
            .map(|r| r.group.as_str())
            .chain(extra_groups)
            .map(|g| (g, Default::default()))
            .collect();

        for reviewer in reviewers {
            let Some(cells) = groups.get_mut(reviewer.group.as_str()) else {
                continue;
            };
            for day in WEEK {
                if reviewer.is_available_on(day) {
                    cells[day.num_days_from_monday() as usize].push(reviewer);
                }
            }
        }

        debug!(
            groups = groups.len(),
            reviewers = reviewers.len(),
            "Built availability index"
        );

        Self { groups }
    }

    /// Reviewers of `group` available on `day`
    pub fn eligible(&self, group: &str, day: Weekday) -> &[&'a Reviewer] {
        self.groups
            .get(group)
            .map(|cells| cells[day.num_days_from_monday() as usize].as_slice())
            .unwrap_or(&[])
    }

    /// Names of `group`'s reviewers available on `day`, without repeats
    ///
    /// Logins are case-insensitive, so `Alice` and `alice` are one reviewer
    /// and the first spelling in the roster is kept.
    pub fn eligible_names(&self, group: &str, day: Weekday) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for reviewer in self.eligible(group, day) {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&reviewer.name)) {
                names.push(reviewer.name.as_str());
            }
        }
        names
    }

    /// Known group names in sorted order
    pub fn groups(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// Whether the index knows about `group`
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }
}
