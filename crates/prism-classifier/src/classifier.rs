//! Classifier facade combining strategies and exclusion

use crate::embedding::{self, EmbeddingDecision};
use crate::exclusion::{self, ExclusionAction, ExclusionHit};
use crate::pattern;
use crate::prototypes::LabelPrototypes;
use prism_domain::{
    ClassificationProvenance, FallbackReason, Signals, Stance,
};
use serde::{Deserialize, Serialize};

/// Thresholds for the embedding strategy and the soft exclusion penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum best-prototype similarity for the embedding strategy to stand
    pub similarity_floor: f64,
    /// Winning margin below which the decision is flagged ambiguous
    pub ambiguity_margin: f64,
    /// Confidence subtracted by a soft exclusion hit
    pub soft_exclusion_penalty: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity_floor: 0.28,
            ambiguity_margin: 0.04,
            soft_exclusion_penalty: 0.15,
        }
    }
}

/// A fully classified sentence, before statement assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSentence {
    /// Winning stance
    pub stance: Stance,
    /// Confidence in [0, 1], after any soft-exclusion penalty
    pub confidence: f64,
    /// Independent signals
    pub signals: Signals,
    /// How the decision was reached
    pub provenance: ClassificationProvenance,
    /// Exclusion rule that fired, if any; `Hard` means drop the statement
    pub exclusion: Option<ExclusionHit>,
}

impl ClassifiedSentence {
    /// Whether a hard exclusion disqualified this sentence.
    pub fn is_hard_excluded(&self) -> bool {
        matches!(
            self.exclusion,
            Some(ExclusionHit {
                action: ExclusionAction::Hard,
                ..
            })
        )
    }
}

/// Stance/signal classifier. Never fails: every sentence resolves to a
/// stance with a confidence.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given thresholds.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a sentence.
    ///
    /// Uses the embedding strategy when both a sentence vector and label
    /// prototypes are available; otherwise falls back to patterns, recording
    /// the reason for audit. Signals come from whichever strategy decided the
    /// stance. The exclusion pass runs last, scoped to the decided stance.
    pub fn classify(
        &self,
        sentence: &str,
        vector: Option<&[f32]>,
        prototypes: Option<&LabelPrototypes>,
    ) -> ClassifiedSentence {
        let (stance, confidence, signals, provenance) = match (vector, prototypes) {
            (Some(vector), Some(prototypes)) => {
                match embedding::classify(
                    vector,
                    prototypes,
                    self.config.similarity_floor,
                    self.config.ambiguity_margin,
                ) {
                    EmbeddingDecision::Classified {
                        stance,
                        confidence,
                        ambiguous,
                        ..
                    } => {
                        let signals = embedding::detect_signals(
                            vector,
                            prototypes,
                            self.config.similarity_floor,
                        );
                        (
                            stance,
                            confidence,
                            signals,
                            ClassificationProvenance::embedding(ambiguous),
                        )
                    }
                    EmbeddingDecision::BelowFloor => {
                        self.pattern_decision(sentence, Some(FallbackReason::BelowSimilarityFloor))
                    }
                }
            }
            (None, Some(_)) => {
                self.pattern_decision(sentence, Some(FallbackReason::MissingSentenceVector))
            }
            (Some(_), None) => {
                self.pattern_decision(sentence, Some(FallbackReason::MissingPrototypes))
            }
            (None, None) => self.pattern_decision(sentence, None),
        };

        let exclusion = exclusion::check(sentence, stance);
        let confidence = match exclusion {
            Some(ExclusionHit {
                action: ExclusionAction::Soft,
                ..
            }) => (confidence - self.config.soft_exclusion_penalty).max(0.0),
            _ => confidence,
        };

        ClassifiedSentence {
            stance,
            confidence,
            signals,
            provenance,
            exclusion,
        }
    }

    fn pattern_decision(
        &self,
        sentence: &str,
        fallback: Option<FallbackReason>,
    ) -> (Stance, f64, Signals, ClassificationProvenance) {
        let decision = pattern::classify(sentence);
        let signals = pattern::detect_signals(sentence);
        let provenance = match fallback {
            Some(reason) => ClassificationProvenance::pattern_fallback(reason),
            None => ClassificationProvenance::pattern(),
        };
        (decision.stance, decision.confidence, signals, provenance)
    }
}
