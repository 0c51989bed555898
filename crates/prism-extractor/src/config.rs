//! Configuration for the Extractor

use prism_classifier::ClassifierConfig;
use serde::{Deserialize, Serialize};

/// Configuration for statement extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum words for a sentence to become a statement
    pub min_words: usize,

    /// Hard cap on sentences examined per run
    pub max_sentences: usize,

    /// Hard cap on statements emitted per run
    pub max_statements: usize,

    /// Classifier thresholds
    pub classifier: ClassifierConfig,
}

impl ExtractorConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_words == 0 {
            return Err("min_words must be greater than 0".to_string());
        }
        if self.max_sentences == 0 {
            return Err("max_sentences must be greater than 0".to_string());
        }
        if self.max_statements == 0 {
            return Err("max_statements must be greater than 0".to_string());
        }
        if self.max_statements > self.max_sentences {
            return Err("max_statements cannot exceed max_sentences".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_words: 5,
            max_sentences: 600,
            max_statements: 400,
            classifier: ClassifierConfig::default(),
        }
    }
}
