//! Construction options shared by all builders
//!
//! The structural catalog (required elements, list non-nullity, choice
//! membership, ele-1 and per-type constraints) always runs. The options here
//! only toggle the supplementary checks layered on top of it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid model configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Options consulted by `build_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Check literal references and `Reference.type` against the resource
    /// types permitted for the element.
    pub check_reference_types: bool,

    /// Reject control characters below U+0020 other than tab, LF and CR in
    /// string-like primitives.
    pub check_control_chars: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_reference_types: true,
            check_control_chars: true,
        }
    }
}

impl ModelConfig {
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Parse a configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn check_reference_types(mut self, enabled: bool) -> Self {
        self.config.check_reference_types = enabled;
        self
    }

    pub fn check_control_chars(mut self, enabled: bool) -> Self {
        self.config.check_control_chars = enabled;
        self
    }

    pub fn build(self) -> ModelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_all_checks() {
        let config = ModelConfig::default();
        assert!(config.check_reference_types);
        assert!(config.check_control_chars);
    }

    #[test]
    fn test_from_yaml_keeps_missing_keys() {
        let config = ModelConfig::from_yaml("check_reference_types: false\n").unwrap();
        assert!(!config.check_reference_types);
        assert!(config.check_control_chars);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ModelConfig::builder().check_control_chars(false).build();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ModelConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ModelConfig::from_yaml("check_reference_types: [1, 2]").is_err());
    }
}
