//! Configuration for traversal merging and resolution

use serde::{Deserialize, Serialize};

/// Configuration for the traversal question merger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Fixed priority boost for partition-type questions
    pub partition_boost: f64,

    /// Region-centroid cosine above this blocks a gate behind a partition
    pub blocking_cosine: f64,

    /// Pruned-affected ratio at or above this auto-resolves a question
    pub auto_resolve_ratio: f64,

    /// Maximum active questions surfaced
    pub max_questions: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            partition_boost: 0.1,
            blocking_cosine: 0.5,
            auto_resolve_ratio: 0.8,
            max_questions: 5,
        }
    }
}

impl TraversalConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.auto_resolve_ratio) {
            return Err("auto_resolve_ratio must be in [0, 1]".to_string());
        }
        if !(-1.0..=1.0).contains(&self.blocking_cosine) {
            return Err("blocking_cosine must be in [-1, 1]".to_string());
        }
        if self.max_questions == 0 {
            return Err("max_questions must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TraversalConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let mut config = TraversalConfig::default();
        config.max_questions = 0;
        assert!(config.validate().is_err());
    }
}
