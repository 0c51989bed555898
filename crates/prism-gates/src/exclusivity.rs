//! Evidence exclusivity per claim
//!
//! A statement is exclusive to a claim when no other claim cites it. The
//! exclusivity ratio is what makes a claim defensible as a binary decision
//! point: answering "no" prunes evidence nothing else depends on.

use prism_domain::{ClaimGraph, StatementId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exclusive vs shared evidence for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimExclusivity {
    /// The claim this breakdown belongs to
    pub claim_id: String,
    /// Statement ids cited by this claim and no other, ascending
    pub exclusive: Vec<StatementId>,
    /// Statement ids also cited by at least one other claim, ascending
    pub shared: Vec<StatementId>,
    /// `|exclusive| / |total|`, 0.0 for claims with no cited statements
    pub ratio: f64,
}

impl ClaimExclusivity {
    /// Total cited statements.
    pub fn total(&self) -> usize {
        self.exclusive.len() + self.shared.len()
    }
}

/// Compute exclusivity for every claim in the graph.
///
/// Duplicate citations within a single claim count once. Output order
/// follows the graph's claim order.
pub fn compute_exclusivity(graph: &ClaimGraph) -> Vec<ClaimExclusivity> {
    let mut citation_counts: HashMap<StatementId, usize> = HashMap::new();
    let deduped: Vec<Vec<StatementId>> = graph
        .claims
        .iter()
        .map(|claim| {
            let mut ids = claim.source_statement_ids.clone();
            ids.sort_unstable();
            ids.dedup();
            ids
        })
        .collect();
    for ids in &deduped {
        for &id in ids {
            *citation_counts.entry(id).or_insert(0) += 1;
        }
    }

    graph
        .claims
        .iter()
        .zip(deduped)
        .map(|(claim, ids)| {
            let (exclusive, shared): (Vec<StatementId>, Vec<StatementId>) =
                ids.into_iter().partition(|id| citation_counts[id] == 1);
            let total = exclusive.len() + shared.len();
            let ratio = if total == 0 {
                0.0
            } else {
                exclusive.len() as f64 / total as f64
            };
            ClaimExclusivity {
                claim_id: claim.id.clone(),
                exclusive,
                shared,
                ratio,
            }
        })
        .collect()
}
