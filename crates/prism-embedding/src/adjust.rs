//! Stance- and model-aware similarity adjustment

use crate::math::quantize;
use prism_domain::Stance;
use serde::{Deserialize, Serialize};

/// Multipliers applied on top of raw cosine similarity before clustering.
///
/// Defaults preserve the original tuning; they are configuration, not derived
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Penalty for stance-antagonistic dominant stances
    /// (directive vs warning, factual vs hedged)
    pub antagonist_multiplier: f64,

    /// Bonus for exactly matching dominant stances
    pub exact_match_multiplier: f64,

    /// Sequential-coherence bonus for precondition/consequence pairs
    pub sequential_multiplier: f64,

    /// Diversity bonus for paragraphs from different models
    pub diversity_multiplier: f64,

    /// Raw similarity a pair must already clear before the diversity bonus
    /// applies
    pub diversity_floor: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            antagonist_multiplier: 0.6,
            exact_match_multiplier: 1.1,
            sequential_multiplier: 1.05,
            diversity_multiplier: 1.15,
            diversity_floor: 0.55,
        }
    }
}

impl AdjustmentConfig {
    /// Identity adjustment: every multiplier 1.0, similarity passes through
    /// untouched (apart from clamping and quantization).
    pub fn identity() -> Self {
        Self {
            antagonist_multiplier: 1.0,
            exact_match_multiplier: 1.0,
            sequential_multiplier: 1.0,
            diversity_multiplier: 1.0,
            diversity_floor: 1.0,
        }
    }

    /// Adjust a raw similarity for a pair of paragraphs.
    ///
    /// Applies the stance multiplier (antagonist, exact match, or sequential
    /// pair), then the cross-model diversity multiplier when the pair is
    /// already similar, then clamps back to [-1, 1] and quantizes.
    pub fn adjust(
        &self,
        raw: f64,
        stance_a: Stance,
        stance_b: Stance,
        model_a: usize,
        model_b: usize,
    ) -> f64 {
        let mut sim = raw;

        if stance_a.is_antagonist_of(stance_b) {
            sim *= self.antagonist_multiplier;
        } else if stance_a == stance_b {
            sim *= self.exact_match_multiplier;
        } else if stance_a.is_sequential_with(stance_b) {
            sim *= self.sequential_multiplier;
        }

        if model_a != model_b && raw > self.diversity_floor {
            sim *= self.diversity_multiplier;
        }

        quantize(sim.clamp(-1.0, 1.0))
    }
}
