//! Match configuration
//!
//! Settings shared by every match built from the same configuration. They can
//! be written by hand or loaded from YAML or JSON:
//!
//! ```yaml
//! default_fallthrough: true
//! ```

use crate::error::{ErrorContext, MatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration applied to a [`Match`](crate::Match) or [`AsyncMatch`](crate::AsyncMatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Fallthrough used by cases that do not set their own
    pub default_fallthrough: bool,
}

impl MatchConfig {
    /// Create the default configuration (no fallthrough)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default fallthrough
    pub fn with_default_fallthrough(mut self, fallthrough: bool) -> Self {
        self.default_fallthrough = fallthrough;
        self
    }

    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: MatchConfig = serde_yaml::from_str(text)?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Load a configuration file; `.json` files are parsed as JSON, anything
    /// else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MatchError::Config(e.to_string()))
            .context(format!("reading {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        };
        parsed.context(format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_has_no_fallthrough() {
        assert!(!MatchConfig::default().default_fallthrough);
        assert!(MatchConfig::new().with_default_fallthrough(true).default_fallthrough);
    }

    #[test]
    fn test_from_yaml_and_json() {
        let yaml = MatchConfig::from_yaml("default_fallthrough: true").unwrap();
        let json = MatchConfig::from_json(r#"{"default_fallthrough": true}"#).unwrap();
        assert_eq!(yaml, json);
        assert!(yaml.default_fallthrough);

        let empty = MatchConfig::from_json("{}").unwrap();
        assert_eq!(empty, MatchConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = MatchConfig::from_yaml("fallthrough: yes").unwrap_err();
        assert!(matches!(err, MatchError::Config(_)));
    }

    #[test]
    fn test_from_path_reports_file() {
        let dir = TempDir::new().unwrap();

        let good = dir.path().join("match.json");
        std::fs::write(&good, br#"{"default_fallthrough": true}"#).unwrap();
        assert!(MatchConfig::from_path(&good).unwrap().default_fallthrough);

        let bad = dir.path().join("match.yaml");
        std::fs::write(&bad, b"default_fallthrough: [").unwrap();
        let err = MatchConfig::from_path(&bad).unwrap_err();
        assert!(err.to_string().contains("match.yaml"));

        let missing = MatchConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
        assert!(missing.to_string().contains("reading"));
    }
}
