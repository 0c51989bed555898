//! Conflict filtering and gate cross-referencing

use crate::config::GateConfig;
use prism_domain::{ClaimGraph, Conflict, ConditionalGate, GateBlock};
use tracing::debug;

/// Filter and enrich the graph's conflict edges into decision points.
///
/// A conflict passes when its significance clears the floor, both sides are
/// high-support, or a challenger claim is involved; low-significance
/// conflicts are kept only when structurally important. Every passing
/// conflict is cross-referenced against the derived gates: a side whose
/// claim id appears in a gate's affected set is recorded as blocked by that
/// gate. Output is sorted passing-first, then by descending significance.
pub fn derive_conflicts(
    graph: &ClaimGraph,
    gates: &[ConditionalGate],
    config: &GateConfig,
) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = graph
        .conflict_edges()
        .map(|edge| {
            let side_a = graph.claim(&edge.source);
            let side_b = graph.claim(&edge.target);
            let both_high_support =
                side_a.is_some_and(|c| c.high_support) && side_b.is_some_and(|c| c.high_support);
            let challenger_involved =
                side_a.is_some_and(|c| c.challenger) || side_b.is_some_and(|c| c.challenger);
            let passes_filter = edge.significance > config.conflict_significance_floor
                || both_high_support
                || challenger_involved;

            let mut blocked_by_gates = Vec::new();
            for gate in gates {
                for side in [&edge.source, &edge.target] {
                    if gate.affected_claim_ids.iter().any(|id| id == side) {
                        blocked_by_gates.push(GateBlock {
                            gate_id: gate.id.clone(),
                            blocked_claim_id: side.clone(),
                        });
                    }
                }
            }
            if !blocked_by_gates.is_empty() {
                debug!(
                    "Conflict {} vs {} blocked by {} gate(s)",
                    edge.source,
                    edge.target,
                    blocked_by_gates.len()
                );
            }

            Conflict {
                claim_a: edge.source.clone(),
                claim_b: edge.target.clone(),
                significance: edge.significance,
                symmetry: edge.symmetry,
                passes_filter,
                blocked_by_gates,
            }
        })
        .collect();

    conflicts.sort_by(|a, b| {
        b.passes_filter
            .cmp(&a.passes_filter)
            .then_with(|| {
                b.significance
                    .partial_cmp(&a.significance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.claim_a.cmp(&b.claim_a))
            .then_with(|| a.claim_b.cmp(&b.claim_b))
    });
    conflicts
}
