//! CLI command implementations

pub mod assign;
pub mod roster;

pub use assign::AssignArgs;
pub use roster::RosterArgs;

use chrono::{Datelike, Weekday};

/// Parse a `--day` value (`mon` .. `sun`)
pub fn parse_day(value: &str) -> Result<Weekday, String> {
    rota_core::parse_day_key(value).ok_or_else(|| {
        format!(
            "'{}' is not a weekday; use mon, tue, wed, thu, fri, sat or sun",
            value
        )
    })
}

/// The local weekday right now
pub fn today() -> Weekday {
    chrono::Local::now().weekday()
}
