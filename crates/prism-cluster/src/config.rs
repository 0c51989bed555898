//! Configuration for the clustering engine

use prism_embedding::AdjustmentConfig;
use serde::{Deserialize, Serialize};

/// Configuration for hierarchical agglomerative clustering.
///
/// The uncertainty thresholds carry the original tuning as documented
/// defaults; none of them is derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Merges stop once linkage distance exceeds `1 - similarity_threshold`
    pub similarity_threshold: f64,

    /// Below this many items, clustering short-circuits to singletons
    pub min_items: usize,

    /// Cluster counts above this are logged (never an error)
    pub safety_ceiling: usize,

    /// Apply the mutual-nearest-neighbor distance discount
    pub mutual_neighbor_boost: bool,

    /// Fractional discount for mutual-neighbor pairs
    pub mutual_neighbor_discount: f64,

    /// Neighborhood size for the mutual-neighbor graph
    pub mutual_neighbor_k: usize,

    /// Stance/model-aware similarity adjustment
    pub adjustment: AdjustmentConfig,

    /// Cohesion below this flags `LowCohesion`
    pub cohesion_floor: f64,

    /// Minimum members for the dumbbell check
    pub dumbbell_min_members: usize,

    /// Cohesion-to-pairwise gap at or above this flags `Dumbbell`
    pub dumbbell_gap: f64,

    /// Member counts above this flag `TooManyMembers`
    pub max_members: usize,

    /// Distinct dominant stances at or above this flag `StanceDiversity`
    pub max_distinct_stances: usize,

    /// Contested-paragraph ratio above this flags `ContestedRatio`
    pub contested_ratio_threshold: f64,

    /// Expansion payload: member budget
    pub expansion_max_members: usize,

    /// Expansion payload: total character budget
    pub expansion_char_budget: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.72,
            min_items: 3,
            safety_ceiling: 24,
            mutual_neighbor_boost: true,
            mutual_neighbor_discount: 0.10,
            mutual_neighbor_k: 2,
            adjustment: AdjustmentConfig::default(),
            cohesion_floor: 0.55,
            dumbbell_min_members: 4,
            dumbbell_gap: 0.10,
            max_members: 8,
            max_distinct_stances: 3,
            contested_ratio_threshold: 0.5,
            expansion_max_members: 5,
            expansion_char_budget: 1200,
        }
    }
}

impl ClusteringConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err("similarity_threshold must be in [0, 1]".to_string());
        }
        if !(0.0..1.0).contains(&self.mutual_neighbor_discount) {
            return Err("mutual_neighbor_discount must be in [0, 1)".to_string());
        }
        if self.expansion_max_members == 0 {
            return Err("expansion_max_members must be greater than 0".to_string());
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
        assert!(ClusteringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = ClusteringConfig::default();
        config.similarity_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_discount_rejected() {
        let mut config = ClusteringConfig::default();
        config.mutual_neighbor_discount = 1.0;
        assert!(config.validate().is_err());
    }
}
