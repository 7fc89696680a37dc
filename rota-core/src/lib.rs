//! Rota Core - day-of-week aware reviewer rotation
//!
//! This crate decides which reviewers to request on a pull request. Reviewers
//! are indexed by group and weekday, then drawn at random per group quota,
//! skipping the author and anyone already requested.

pub mod assign;
pub mod availability;
pub mod config;
pub mod context;
pub mod error;
pub mod reviewer;
pub mod selector;

pub use assign::{assign_reviewers, AssignOutcome, ReviewHost};
pub use availability::AvailabilityIndex;
pub use config::{Config, SelectionConfig, ShortfallPolicy};
pub use context::PullRequestRef;
pub use error::{Error, Result};
pub use reviewer::{day_key, parse_day_key, Availability, Reviewer, WEEK};
pub use selector::{skip_reason, PrSnapshot, Selection, Selector, Shortfall, SkipReason};
