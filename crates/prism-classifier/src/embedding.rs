//! Embedding classification strategy

use crate::prototypes::{LabelPrototypes, SIGNAL_LABELS};
use prism_domain::{Signals, Stance};
use prism_embedding::cosine_similarity;

/// Per-stance scores from the embedding strategy, kept for audit.
#[derive(Debug, Clone, PartialEq)]
pub struct StanceScores {
    /// Best score per stance, in `Stance::ALL` order
    pub scores: [(Stance, f64); 6],
    /// Margin between the best and runner-up stance
    pub margin: f64,
}

/// Outcome of the embedding strategy for one sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingDecision {
    /// The best-scoring stance cleared the similarity floor
    Classified {
        /// Winning stance
        stance: Stance,
        /// Best-variant cosine score, used as confidence
        confidence: f64,
        /// Margin to the runner-up fell below the ambiguity threshold
        ambiguous: bool,
        /// Full score table
        scores: StanceScores,
    },
    /// No stance cleared the floor; the caller falls back to patterns
    BelowFloor,
}

/// Score a sentence vector against each stance's prototype variants.
///
/// A label's score is the maximum cosine similarity across its three
/// paraphrase variants. The best stance wins if its score clears
/// `similarity_floor`; a winning margin under `ambiguity_margin` flags the
/// decision ambiguous.
pub fn classify(
    vector: &[f32],
    prototypes: &LabelPrototypes,
    similarity_floor: f64,
    ambiguity_margin: f64,
) -> EmbeddingDecision {
    let mut scores: Vec<(Stance, f64)> = Stance::ALL
        .iter()
        .map(|&stance| (stance, label_score(vector, &prototypes.stances[&stance])))
        .collect();

    // Sort by descending score; priority order breaks exact ties so the
    // decision is deterministic.
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.0.priority().cmp(&a.0.priority()))
    });

    let (best_stance, best_score) = scores[0];
    if best_score < similarity_floor {
        return EmbeddingDecision::BelowFloor;
    }

    let margin = best_score - scores[1].1;
    let table: [(Stance, f64); 6] = std::array::from_fn(|i| scores[i]);

    EmbeddingDecision::Classified {
        stance: best_stance,
        confidence: best_score,
        ambiguous: margin < ambiguity_margin,
        scores: StanceScores {
            scores: table,
            margin,
        },
    }
}

/// Detect signals by prototype similarity, each against its own set.
pub fn detect_signals(
    vector: &[f32],
    prototypes: &LabelPrototypes,
    similarity_floor: f64,
) -> Signals {
    let mut flags = [false; 3];
    for (i, label) in SIGNAL_LABELS.iter().enumerate() {
        flags[i] = label_score(vector, &prototypes.signals[label]) >= similarity_floor;
    }
    Signals {
        ordering: flags[0],
        tension: flags[1],
        conditionality: flags[2],
    }
}

fn label_score(vector: &[f32], variants: &[Vec<f32>]) -> f64 {
    variants
        .iter()
        .map(|v| cosine_similarity(vector, v))
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Prototypes in a toy 10-dimensional space: stance i points along axis
    /// i, signal j along axis 6 + j.
    fn axis_prototypes() -> LabelPrototypes {
        let mut stances = HashMap::new();
        for (i, stance) in Stance::ALL.into_iter().enumerate() {
            let mut v = vec![0.0f32; 10];
            v[i] = 1.0;
            stances.insert(stance, Arc::new(vec![v.clone(), v.clone(), v]));
        }
        let mut signals = HashMap::new();
        for (i, label) in SIGNAL_LABELS.into_iter().enumerate() {
            let mut v = vec![0.0f32; 10];
            v[6 + i] = 1.0;
            signals.insert(label, Arc::new(vec![v.clone(), v.clone(), v]));
        }
        LabelPrototypes { stances, signals }
    }

    #[test]
    fn test_clear_winner() {
        let prototypes = axis_prototypes();
        // Points along the Precondition axis (index 0 of Stance::ALL).
        let mut vector = vec![0.0f32; 10];
        vector[0] = 1.0;

        match classify(&vector, &prototypes, 0.28, 0.04) {
            EmbeddingDecision::Classified {
                stance,
                confidence,
                ambiguous,
                ..
            } => {
                assert_eq!(stance, Stance::Precondition);
                assert_eq!(confidence, 1.0);
                assert!(!ambiguous);
            }
            other => panic!("expected classification, got {other:?}"),
        }
    }

    #[test]
    fn test_below_floor_falls_back() {
        let prototypes = axis_prototypes();
        // Orthogonal to every stance axis.
        let mut vector = vec![0.0f32; 10];
        vector[9] = 1.0;

        assert_eq!(
            classify(&vector, &prototypes, 0.28, 0.04),
            EmbeddingDecision::BelowFloor
        );
    }

    #[test]
    fn test_narrow_margin_flags_ambiguous() {
        let prototypes = axis_prototypes();
        // Nearly equidistant between the first two stance axes.
        let mut vector = vec![0.0f32; 10];
        vector[0] = 0.71;
        vector[1] = 0.704;

        match classify(&vector, &prototypes, 0.28, 0.04) {
            EmbeddingDecision::Classified {
                ambiguous, scores, ..
            } => {
                assert!(ambiguous);
                assert!(scores.margin < 0.04);
            }
            other => panic!("expected classification, got {other:?}"),
        }
    }

    #[test]
    fn test_signal_detection_uses_own_prototypes() {
        let prototypes = axis_prototypes();
        let ordering_axis = prototypes.signals["ordering"][0].clone();
        let signals = detect_signals(&ordering_axis, &prototypes, 0.28);
        assert!(signals.ordering);
    }
}
