//! Reviewer records and their declared availability

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The seven weekdays in index order (Monday first)
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase three-letter key for a weekday (`mon`, `tue`, ...)
pub fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Parse a three-letter weekday key, ignoring case and surrounding whitespace
pub fn parse_day_key(key: &str) -> Option<Weekday> {
    let key = key.trim().to_lowercase();
    WEEK.into_iter().find(|d| day_key(*d) == key)
}

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// One availability tag from a reviewer's `day` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Availability {
    /// A single named weekday (`mon` .. `sun`)
    On(Weekday),
    /// `everyday`
    Everyday,
    /// `weekday`: Monday through Friday
    Weekdays,
    /// `weekend`: Saturday and Sunday
    Weekend,
}

impl Availability {
    /// Whether this tag makes a reviewer available on `day`
    pub fn covers(&self, day: Weekday) -> bool {
        match self {
            Availability::On(d) => *d == day,
            Availability::Everyday => true,
            Availability::Weekdays => !is_weekend(day),
            Availability::Weekend => is_weekend(day),
        }
    }

    /// The tag as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::On(d) => day_key(*d),
            Availability::Everyday => "everyday",
            Availability::Weekdays => "weekday",
            Availability::Weekend => "weekend",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "everyday" => Ok(Availability::Everyday),
            "weekday" => Ok(Availability::Weekdays),
            "weekend" => Ok(Availability::Weekend),
            other => parse_day_key(other).map(Availability::On).ok_or_else(|| {
                format!(
                    "unknown availability tag '{}': \
                     expected mon..sun, everyday, weekday or weekend",
                    s
                )
            }),
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Availability> for String {
    fn from(tag: Availability) -> Self {
        tag.as_str().to_string()
    }
}

/// A reviewer in the rota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reviewer {
    /// Host login (e.g. GitHub username)
    pub name: String,
    /// Group the reviewer's quota is counted against
    pub group: String,
    /// Availability tags; `None` means every day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Vec<Availability>>,
}

impl Reviewer {
    /// Create a reviewer available every day
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            day: None,
        }
    }

    /// Restrict availability to the given tags
    pub fn with_days(mut self, tags: impl IntoIterator<Item = Availability>) -> Self {
        self.day = Some(tags.into_iter().collect());
        self
    }

    /// Whether the reviewer can be requested on `day`
    ///
    /// An explicit empty tag list matches no day.
    pub fn is_available_on(&self, day: Weekday) -> bool {
        match &self.day {
            None => true,
            Some(tags) => tags.iter().any(|t| t.covers(day)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_keys() {
        let keys: Vec<&str> = WEEK.iter().map(|d| day_key(*d)).collect();
        assert_eq!(keys, ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]);
        assert_eq!(parse_day_key("Wed"), Some(Weekday::Wed));
        assert_eq!(parse_day_key("wednesday"), None);
    }

    #[test]
    fn test_unset_day_is_always_available() {
        let r = Reviewer::new("alice", "core");
        assert!(WEEK.iter().all(|d| r.is_available_on(*d)));
    }

    #[test]
    fn test_everyday_matches_unset() {
        let r = Reviewer::new("alice", "core").with_days([Availability::Everyday]);
        assert!(WEEK.iter().all(|d| r.is_available_on(*d)));
    }

    #[test]
    fn test_weekend_only() {
        let r = Reviewer::new("bob", "core").with_days([Availability::Weekend]);
        for day in WEEK {
            let expected = matches!(day, Weekday::Sat | Weekday::Sun);
            assert_eq!(r.is_available_on(day), expected, "{}", day_key(day));
        }
    }

    #[test]
    fn test_weekday_only() {
        let r = Reviewer::new("carol", "core").with_days([Availability::Weekdays]);
        assert!(r.is_available_on(Weekday::Mon));
        assert!(r.is_available_on(Weekday::Fri));
        assert!(!r.is_available_on(Weekday::Sat));
        assert!(!r.is_available_on(Weekday::Sun));
    }

    #[test]
    fn test_specific_days_combine() {
        let r = Reviewer::new("dave", "core")
            .with_days([Availability::On(Weekday::Tue), Availability::Weekend]);
        assert!(r.is_available_on(Weekday::Tue));
        assert!(r.is_available_on(Weekday::Sun));
        assert!(!r.is_available_on(Weekday::Wed));
    }

    #[test]
    fn test_empty_tag_list_matches_nothing() {
        let r = Reviewer::new("erin", "core").with_days(Vec::new());
        assert!(!WEEK.iter().any(|d| r.is_available_on(*d)));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("mon".parse::<Availability>(), Ok(Availability::On(Weekday::Mon)));
        assert_eq!("Weekend".parse::<Availability>(), Ok(Availability::Weekend));
        assert_eq!("weekday".parse::<Availability>(), Ok(Availability::Weekdays));
        assert!("holiday".parse::<Availability>().unwrap_err().contains("holiday"));
    }

    #[test]
    fn test_misspelled_field_rejected() {
        let toml = r#"
name = "bob"
group = "backend"
days = ["weekend"]
"#;
        assert!(toml::from_str::<Reviewer>(toml).is_err());
    }

    #[test]
    fn test_deserialize_reviewer() {
        let toml = r#"
name = "alice"
group = "backend"
day = ["mon", "weekend"]
"#;
        let r: Reviewer = toml::from_str(toml).unwrap();
        assert_eq!(r.name, "alice");
        assert_eq!(
            r.day,
            Some(vec![Availability::On(Weekday::Mon), Availability::Weekend])
        );
    }
}
