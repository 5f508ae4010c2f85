//! Validation run configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkers::checker_names;

/// Errors from loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown checker: '{0}'. Available: {1}")]
    UnknownChecker(String, String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Which checkers a validation run applies.
///
/// ```yaml
/// disabled_checkers:
///   - entry-percentage
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Checker names to skip
    pub disabled_checkers: BTreeSet<String>,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the named checker.
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.disabled_checkers.insert(name.into());
        self
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled_checkers.contains(name)
    }

    /// Parse a configuration from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ValidationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Reject checker names that are not registered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let known = checker_names();
        for name in &self.disabled_checkers {
            if !known.iter().any(|k| *k == name.as_str()) {
                return Err(ConfigError::UnknownChecker(name.clone(), known.join(", ")));
            }
        }
        Ok(())
    }
}
