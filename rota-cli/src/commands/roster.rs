//! Roster command - show who is on duty for a weekday

use chrono::Weekday;
use clap::Args;
use rota_core::{day_key, Config, Selector};

use super::{parse_day, today};

/// Show eligible reviewers per group
#[derive(Args, Debug)]
pub struct RosterArgs {
    /// Weekday to show (defaults to today)
    #[arg(long, value_parser = parse_day)]
    pub day: Option<Weekday>,
}

impl RosterArgs {
    /// Execute the roster command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let day = self.day.unwrap_or_else(today);
        print!("{}", render(config, day));
        Ok(())
    }
}

fn render(config: &Config, day: Weekday) -> String {
    let selector = Selector::from_config(config);
    let index = selector.index();

    let mut out = format!("Reviewer rota for {}\n", day_key(day));
    out.push_str("=====================\n");

    for group in index.groups() {
        let names = index.eligible_names(group, day);
        let quota = config
            .quota
            .get(group)
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("\n{} (quota {})\n", group, quota));
        if names.is_empty() {
            out.push_str("  (nobody available)\n");
        }
        for name in names {
            out.push_str(&format!("  {}\n", name));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::{Availability, Reviewer};

    #[test]
    fn test_render_lists_groups_and_quota() {
        let config = Config {
            quota: [("backend".to_string(), 2), ("security".to_string(), 1)]
                .into_iter()
                .collect(),
            reviewers: vec![
                Reviewer::new("alice", "backend"),
                Reviewer::new("bob", "backend").with_days([Availability::Weekend]),
                Reviewer::new("carol", "docs"),
            ],
            ..Config::default()
        };

        let out = render(&config, Weekday::Mon);
        assert!(out.starts_with("Reviewer rota for mon"));
        assert!(out.contains("backend (quota 2)\n  alice\n"));
        assert!(!out.contains("bob"));
        assert!(out.contains("docs (quota -)\n  carol\n"));
        assert!(out.contains("security (quota 1)\n  (nobody available)\n"));
    }
}
