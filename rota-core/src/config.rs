//! Rota configuration
//!
//! The config file is located in this order:
//! 1. An explicit path (`--config` / `ROTA_CONFIG`)
//! 2. `.github/reviewer-rota.toml` in the working directory
//! 3. `~/.config/rota/config.toml`
//!
//! The shortfall policy can be overridden with `ROTA_SHORTFALL` and then by
//! a CLI flag.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::reviewer::Reviewer;
use crate::{Error, Result};

/// Repository-relative location of the config file
pub const REPO_CONFIG_PATH: &str = ".github/reviewer-rota.toml";

/// What to do when today's pool cannot fill a group's quota
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortfallPolicy {
    /// Request fewer reviewers than the quota
    #[default]
    Accept,
    /// Top up from the pools of the following days
    Rollover,
}

impl fmt::Display for ShortfallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortfallPolicy::Accept => write!(f, "accept"),
            ShortfallPolicy::Rollover => write!(f, "rollover"),
        }
    }
}

impl FromStr for ShortfallPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(ShortfallPolicy::Accept),
            "rollover" => Ok(ShortfallPolicy::Rollover),
            other => Err(Error::Config(format!(
                "Unknown shortfall policy '{}': expected accept or rollover",
                other
            ))),
        }
    }
}

/// Selection settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// Shortfall policy
    pub shortfall: ShortfallPolicy,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reviewers to request per group
    pub quota: BTreeMap<String, u32>,

    /// Selection settings
    pub selection: SelectionConfig,

    /// The rota
    pub reviewers: Vec<Reviewer>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            groups = config.quota.len(),
            reviewers = config.reviewers.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Get the user-level config file path
    ///
    /// Returns `~/.config/rota/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rota").join("config.toml"))
    }

    /// Resolve which config file to use
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        Self::locate_from(explicit, Path::new(""), Self::default_config_path())
    }

    /// Resolve the config file relative to `repo_root`, falling back to
    /// `user_path`
    pub fn locate_from(
        explicit: Option<&Path>,
        repo_root: &Path,
        user_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let repo_path = repo_root.join(REPO_CONFIG_PATH);
        if repo_path.exists() {
            return Ok(repo_path);
        }

        if let Some(path) = user_path {
            if path.exists() {
                return Ok(path);
            }
        }

        Err(Error::Config(format!(
            "No config file found. Create {} or pass --config",
            REPO_CONFIG_PATH
        )))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - ROTA_SHORTFALL: `accept` or `rollover`
    pub fn with_env_overrides(self) -> Self {
        self.with_shortfall_override(std::env::var("ROTA_SHORTFALL").ok())
    }

    fn with_shortfall_override(mut self, value: Option<String>) -> Self {
        if let Some(value) = value {
            match value.parse() {
                Ok(policy) => self.selection.shortfall = policy,
                Err(e) => warn!(error = %e, "Ignoring ROTA_SHORTFALL"),
            }
        }
        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, shortfall: Option<ShortfallPolicy>) -> Self {
        if let Some(policy) = shortfall {
            self.selection.shortfall = policy;
        }
        self
    }

    /// Locate, load and apply all overrides
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        explicit: Option<&Path>,
        shortfall: Option<ShortfallPolicy>,
    ) -> Result<Self> {
        let path = Self::locate(explicit)?;
        Ok(Self::load_from_file(&path)?
            .with_env_overrides()
            .with_cli_overrides(shortfall))
    }

    /// Check for likely mistakes that do not prevent a run
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.reviewers.is_empty() {
            warnings.push("No reviewers configured".to_string());
        }

        for (group, &count) in &self.quota {
            if count == 0 {
                warnings.push(format!("Quota for group '{}' is zero", group));
            }
            if !self.reviewers.iter().any(|r| &r.group == group) {
                warnings.push(format!("Quota group '{}' has no reviewers", group));
            }
        }

        let mut seen = HashSet::new();
        for r in &self.reviewers {
            if !seen.insert((r.group.as_str(), r.name.to_ascii_lowercase())) {
                warnings.push(format!(
                    "Reviewer '{}' is listed more than once in group '{}'",
                    r.name, r.group
                ));
            }
            if !self.quota.contains_key(&r.group) {
                warnings.push(format!(
                    "Reviewer '{}' belongs to group '{}', which has no quota",
                    r.name, r.group
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviewer::Availability;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = r#"
[quota]
backend = 2
frontend = 1

[selection]
shortfall = "rollover"

[[reviewers]]
name = "alice"
group = "backend"
day = ["weekday"]

[[reviewers]]
name = "bob"
group = "backend"

[[reviewers]]
name = "carol"
group = "frontend"
day = ["sat", "sun"]
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.quota.is_empty());
        assert!(config.reviewers.is_empty());
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Accept);
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.quota.get("backend"), Some(&2));
        assert_eq!(config.quota.get("frontend"), Some(&1));
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Rollover);
        assert_eq!(config.reviewers.len(), 3);
        assert_eq!(config.reviewers[0].day, Some(vec![Availability::Weekdays]));
        assert!(config.reviewers[1].day.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[quota]
core = 1
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Accept);
        assert!(config.reviewers.is_empty());
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let toml = r#"
[[reviewers]]
name = "alice"
group = "core"
day = ["holiday"]
"#;
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("holiday"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.reviewers[2].name, "carol");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/rota.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = Config::locate(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_locate_finds_repo_file() {
        let root = TempDir::new().unwrap();
        let user = root.path().join("user.toml");
        std::fs::write(&user, SAMPLE).unwrap();
        std::fs::create_dir_all(root.path().join(".github")).unwrap();
        std::fs::write(root.path().join(REPO_CONFIG_PATH), SAMPLE).unwrap();

        let path = Config::locate_from(None, root.path(), Some(user)).unwrap();
        assert_eq!(path, root.path().join(REPO_CONFIG_PATH));
    }

    #[test]
    fn test_locate_falls_back_to_user_file() {
        let root = TempDir::new().unwrap();
        let user = root.path().join("user.toml");
        std::fs::write(&user, SAMPLE).unwrap();

        let path = Config::locate_from(None, root.path(), Some(user.clone())).unwrap();
        assert_eq!(path, user);
    }

    #[test]
    fn test_locate_without_any_file_is_an_error() {
        let root = TempDir::new().unwrap();
        let user = root.path().join("missing.toml");

        let err = Config::locate_from(None, root.path(), Some(user)).unwrap_err();
        assert!(err.to_string().contains("No config file found"));
        assert!(Config::locate_from(None, root.path(), None).is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml = r#"
[[reviewers]]
name = "alice"
group = "core"
days = ["weekend"]
"#;
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("days"));

        let toml = r#"
[selection]
shortfal = "rollover"
"#;
        assert!(Config::from_toml_str(toml).is_err());

        let toml = r#"
quotas = { core = 1 }
"#;
        assert!(Config::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_shortfall_override(Some("rollover".to_string()));
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Rollover);

        let config = config.with_shortfall_override(Some("sometimes".to_string()));
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Rollover);

        let config = config.with_cli_overrides(Some(ShortfallPolicy::Accept));
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Accept);

        let config = config.with_cli_overrides(None);
        assert_eq!(config.selection.shortfall, ShortfallPolicy::Accept);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Rollover".parse::<ShortfallPolicy>().unwrap(), ShortfallPolicy::Rollover);
        assert!("never".parse::<ShortfallPolicy>().is_err());
        assert_eq!(ShortfallPolicy::Accept.to_string(), "accept");
    }

    #[test]
    fn test_validate() {
        let toml = r#"
[quota]
backend = 1
security = 1
docs = 0

[[reviewers]]
name = "alice"
group = "backend"

[[reviewers]]
name = "alice"
group = "backend"

[[reviewers]]
name = "dave"
group = "ops"
"#;
        let warnings = Config::from_toml_str(toml).unwrap().validate();
        assert!(warnings.iter().any(|w| w.contains("'security' has no reviewers")));
        assert!(warnings.iter().any(|w| w.contains("'docs' is zero")));
        assert!(warnings.iter().any(|w| w.contains("more than once")));
        assert!(warnings.iter().any(|w| w.contains("'ops', which has no quota")));
    }

    #[test]
    fn test_validate_duplicate_ignores_case() {
        let toml = r#"
[quota]
core = 2

[[reviewers]]
name = "Alice"
group = "core"

[[reviewers]]
name = "alice"
group = "core"
"#;
        let warnings = Config::from_toml_str(toml).unwrap().validate();
        assert!(warnings.iter().any(|w| w.contains("'alice' is listed more than once")));
    }

    #[test]
    fn test_validate_clean_config() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert!(config.validate().is_empty());
    }
}
