//! Configuration for gate and conflict derivation

use serde::{Deserialize, Serialize};

/// Configuration for the gate deriver and conflict filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum exclusive statements for a claim to be a gate candidate
    pub min_exclusive: usize,

    /// Exclusivity ratio a candidate must clear
    pub exclusivity_ratio_floor: f64,

    /// Below this many total statements the ratio is not trusted; the claim
    /// qualifies only when every statement is exclusive
    pub small_claim_threshold: usize,

    /// Context-specificity a candidate must clear to become a gate
    pub context_specificity_floor: f64,

    /// Source-statement Jaccard overlap at or above this merges two gates
    pub dedup_jaccard: f64,

    /// Maximum gates surfaced per run
    pub max_gates: usize,

    /// Score multiplier for gates adjacent to a conflict edge
    pub conflict_adjacency_boost: f64,

    /// Conflicts with significance above this pass the filter outright
    pub conflict_significance_floor: f64,

    /// Minimum character length for a distinguishing term
    pub term_min_len: usize,

    /// Local statements must use a term at least this often
    pub term_min_local_count: usize,

    /// Local-vs-global frequency ratio a distinguishing term must clear
    pub term_ratio_floor: f64,

    /// Distinguishing terms kept per claim
    pub term_max_terms: usize,

    /// Mean pairwise coherence at or above this makes a term a context anchor
    pub coherence_anchor_floor: f64,

    /// Mean pairwise coherence below this makes a term epistemic
    pub coherence_epistemic_ceiling: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_exclusive: 2,
            exclusivity_ratio_floor: 0.5,
            small_claim_threshold: 4,
            context_specificity_floor: 0.45,
            dedup_jaccard: 0.65,
            max_gates: 5,
            conflict_adjacency_boost: 1.2,
            conflict_significance_floor: 0.3,
            term_min_len: 4,
            term_min_local_count: 2,
            term_ratio_floor: 2.0,
            term_max_terms: 5,
            coherence_anchor_floor: 0.6,
            coherence_epistemic_ceiling: 0.35,
        }
    }
}

impl GateConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_exclusive == 0 {
            return Err("min_exclusive must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.exclusivity_ratio_floor) {
            return Err("exclusivity_ratio_floor must be in [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.dedup_jaccard) {
            return Err("dedup_jaccard must be in [0, 1]".to_string());
        }
        if self.coherence_epistemic_ceiling > self.coherence_anchor_floor {
            return Err(
                "coherence_epistemic_ceiling must not exceed coherence_anchor_floor".to_string(),
            );
        }
        if self.conflict_adjacency_boost < 1.0 {
            return Err("conflict_adjacency_boost must be at least 1.0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
