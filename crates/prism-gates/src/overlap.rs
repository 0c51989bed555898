//! Pairwise evidence overlap between claims

use prism_domain::{ClaimGraph, StatementId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Jaccard overlap of two claims' cited evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimOverlap {
    /// Lexically smaller claim id
    pub claim_a: String,
    /// Lexically larger claim id
    pub claim_b: String,
    /// `|A ∩ B| / |A ∪ B|`
    pub jaccard: f64,
}

/// Jaccard similarity of two statement-id sets.
pub fn jaccard(a: &[StatementId], b: &[StatementId]) -> f64 {
    let set_a: HashSet<StatementId> = a.iter().copied().collect();
    let set_b: HashSet<StatementId> = b.iter().copied().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Compute evidence overlap for every claim pair.
///
/// Only pairs with overlap > 0 appear, sorted by descending Jaccard with an
/// ascending (claim_a, claim_b) tie-break.
pub fn claim_overlap(graph: &ClaimGraph) -> Vec<ClaimOverlap> {
    let mut overlaps = Vec::new();
    for (i, a) in graph.claims.iter().enumerate() {
        for b in &graph.claims[i + 1..] {
            let score = jaccard(&a.source_statement_ids, &b.source_statement_ids);
            if score > 0.0 {
                let (claim_a, claim_b) = if a.id <= b.id {
                    (a.id.clone(), b.id.clone())
                } else {
                    (b.id.clone(), a.id.clone())
                };
                overlaps.push(ClaimOverlap {
                    claim_a,
                    claim_b,
                    jaccard: score,
                });
            }
        }
    }
    overlaps.sort_by(|x, y| {
        y.jaccard
            .partial_cmp(&x.jaccard)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.claim_a.cmp(&y.claim_a))
            .then_with(|| x.claim_b.cmp(&y.claim_b))
    });
    overlaps
}
