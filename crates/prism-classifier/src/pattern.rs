//! Pattern classification strategy

use crate::patterns;
use prism_domain::{Signals, Stance};

/// Outcome of the pattern strategy for one sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternDecision {
    /// Winning stance (factual when nothing matched)
    pub stance: Stance,
    /// `min(1.0, 0.5 + 0.15 * match_count)`
    pub confidence: f64,
    /// Number of triggers the winning stance matched
    pub match_count: usize,
}

/// Classify a sentence by regex triggers.
///
/// Walks stances in priority order; the first stance with at least one
/// matching trigger wins. With no matches anywhere the sentence is factual at
/// base confidence.
pub fn classify(sentence: &str) -> PatternDecision {
    for stance in Stance::ALL {
        let match_count = patterns::stance_triggers(stance)
            .iter()
            .filter(|r| r.is_match(sentence))
            .count();
        if match_count > 0 {
            return PatternDecision {
                stance,
                confidence: confidence_for(match_count),
                match_count,
            };
        }
    }

    PatternDecision {
        stance: Stance::Factual,
        confidence: confidence_for(0),
        match_count: 0,
    }
}

/// Detect the three independent signals by their own trigger tables.
pub fn detect_signals(sentence: &str) -> Signals {
    Signals {
        ordering: patterns::ORDERING_TRIGGERS
            .iter()
            .any(|r| r.is_match(sentence)),
        tension: patterns::TENSION_TRIGGERS
            .iter()
            .any(|r| r.is_match(sentence)),
        conditionality: patterns::CONDITIONALITY_TRIGGERS
            .iter()
            .any(|r| r.is_match(sentence)),
    }
}

fn confidence_for(match_count: usize) -> f64 {
    (0.5 + 0.15 * match_count as f64).min(1.0)
}
