//! Embedding-coherence validation of distinguishing terms
//!
//! A distinguishing term is only safe to build a question around when the
//! statements using it are talking about the same situation. Tight coherence
//! marks a situational fork (context anchor); loose coherence marks a genuine
//! belief disagreement (epistemic), which a yes/no gate cannot settle.

use crate::config::GateConfig;
use prism_domain::{StatementId, TermClass};
use prism_embedding::{cosine_similarity, quantize};
use std::collections::HashMap;

/// Mean pairwise similarity among statements containing the term.
///
/// Returns `None` when fewer than two of the term's statements have vectors;
/// coherence cannot be judged from a single point.
pub fn term_coherence(
    term: &str,
    statements: &[(StatementId, &str)],
    vectors: &HashMap<StatementId, Vec<f32>>,
) -> Option<f64> {
    let lowered = term.to_lowercase();
    let holders: Vec<&Vec<f32>> = statements
        .iter()
        .filter(|(_, text)| text.to_lowercase().contains(&lowered))
        .filter_map(|(id, _)| vectors.get(id))
        .collect();
    if holders.len() < 2 {
        return None;
    }

    let mut sims = Vec::new();
    for (i, a) in holders.iter().enumerate() {
        for b in &holders[i + 1..] {
            sims.push(cosine_similarity(a, b));
        }
    }
    Some(quantize(sims.iter().sum::<f64>() / sims.len() as f64))
}

/// Classify a term by its coherence band. Unmeasurable coherence is
/// `Ambiguous`, never a hard rejection.
pub fn classify_term(coherence: Option<f64>, config: &GateConfig) -> TermClass {
    match coherence {
        Some(c) if c >= config.coherence_anchor_floor => TermClass::ContextAnchor,
        Some(c) if c < config.coherence_epistemic_ceiling => TermClass::Epistemic,
        _ => TermClass::Ambiguous,
    }
}

/// Context specificity from the anchor/ambiguous/epistemic mix.
///
/// Anchors count fully, ambiguous terms half, epistemic terms not at all.
/// No terms means no measurable specificity.
pub fn context_specificity(classes: &[TermClass]) -> f64 {
    if classes.is_empty() {
        return 0.0;
    }
    let weight: f64 = classes
        .iter()
        .map(|class| match class {
            TermClass::ContextAnchor => 1.0,
            TermClass::Ambiguous => 0.5,
            TermClass::Epistemic => 0.0,
        })
        .sum();
    quantize(weight / classes.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(entries: &[(u64, Vec<f32>)]) -> HashMap<StatementId, Vec<f32>> {
        entries
            .iter()
            .map(|(n, v)| (StatementId(*n), v.clone()))
            .collect()
    }

    #[test]
    fn test_tight_coherence_is_anchor() {
        let statements: Vec<(StatementId, &str)> = vec![
            (StatementId(1), "Startups should rent infrastructure."),
            (StatementId(2), "Startups rarely need dedicated ops."),
        ];
        let vectors = vectors(&[(1, vec![1.0, 0.0]), (2, vec![0.98, 0.198_997])]);
        let coherence = term_coherence("startups", &statements, &vectors);
        assert!(coherence.unwrap() > 0.9);
        assert_eq!(
            classify_term(coherence, &GateConfig::default()),
            TermClass::ContextAnchor
        );
    }

    #[test]
    fn test_loose_coherence_is_epistemic() {
        let statements: Vec<(StatementId, &str)> = vec![
            (StatementId(1), "Monoliths are simpler to operate."),
            (StatementId(2), "Monoliths become unmaintainable at scale."),
        ];
        let vectors = vectors(&[(1, vec![1.0, 0.0]), (2, vec![0.1, 0.994_987])]);
        let coherence = term_coherence("monoliths", &statements, &vectors);
        assert_eq!(
            classify_term(coherence, &GateConfig::default()),
            TermClass::Epistemic
        );
    }

    #[test]
    fn test_single_vector_is_unmeasurable() {
        let statements: Vec<(StatementId, &str)> =
            vec![(StatementId(1), "Only one statement mentions caching.")];
        let vectors = vectors(&[(1, vec![1.0, 0.0])]);
        assert_eq!(term_coherence("caching", &statements, &vectors), None);
        assert_eq!(
            classify_term(None, &GateConfig::default()),
            TermClass::Ambiguous
        );
    }

    #[test]
    fn test_specificity_mix() {
        assert_eq!(context_specificity(&[]), 0.0);
        assert_eq!(context_specificity(&[TermClass::ContextAnchor]), 1.0);
        assert_eq!(
            context_specificity(&[TermClass::ContextAnchor, TermClass::Epistemic]),
            0.5
        );
        assert_eq!(
            context_specificity(&[TermClass::Ambiguous, TermClass::Ambiguous]),
            0.5
        );
    }
}
