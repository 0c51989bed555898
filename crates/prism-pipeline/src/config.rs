//! Aggregated pipeline configuration

use prism_cluster::ClusteringConfig;
use prism_extractor::ExtractorConfig;
use prism_gates::GateConfig;
use prism_traversal::TraversalConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a whole pipeline run, aggregating every stage's config.
///
/// Passed by value, never mutated in place. Defaults match the documented
/// per-stage defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Embedding model identifier, used to key the label-prototype cache
    pub embedding_model_id: String,

    /// Texts per embedding request
    pub embedding_batch_size: usize,

    /// Classify stances by prototype similarity instead of patterns alone
    pub embedding_classification: bool,

    /// Statement extraction and paragraph projection
    pub extractor: ExtractorConfig,

    /// Clustering engine
    pub clustering: ClusteringConfig,

    /// Gate and conflict derivation
    pub gates: GateConfig,

    /// Traversal question merging
    pub traversal: TraversalConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_model_id: "prism-embed-256".to_string(),
            embedding_batch_size: 64,
            embedding_classification: true,
            extractor: ExtractorConfig::default(),
            clustering: ClusteringConfig::default(),
            gates: GateConfig::default(),
            traversal: TraversalConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration and every sub-configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.embedding_model_id.is_empty() {
            return Err("embedding_model_id must not be empty".to_string());
        }
        if self.embedding_batch_size == 0 {
            return Err("embedding_batch_size must be greater than 0".to_string());
        }
        self.extractor.validate()?;
        self.clustering.validate()?;
        self.gates.validate()?;
        self.traversal.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
