//! Dispatch configuration.
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! tie-break = "reject"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration of a [`Context`](crate::Context).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DispatchConfig {
    /// What to do when several candidates share the best rank vector.
    pub tie_break: TieBreak,
}

/// Policy for candidates with identical rank vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The earliest registered method wins.
    #[default]
    FirstRegistered,
    /// The call fails with `AmbiguousMethod`.
    Reject,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Parse a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source_uses_defaults() {
        let config = DispatchConfig::from_toml_str("").unwrap();
        assert_eq!(config, DispatchConfig::default());
        assert_eq!(config.tie_break, TieBreak::FirstRegistered);
    }

    #[test]
    fn parses_tie_break() {
        let config = DispatchConfig::from_toml_str("tie-break = \"reject\"").unwrap();
        assert_eq!(config.tie_break, TieBreak::Reject);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = DispatchConfig::from_toml_str("tie-break = \"newest\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DispatchConfig::load("/nonexistent/pmd.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pmd.toml"));
    }

    #[test]
    fn builder_sets_policy() {
        let config = DispatchConfig::new().with_tie_break(TieBreak::Reject);
        assert_eq!(config.tie_break, TieBreak::Reject);
    }
}
