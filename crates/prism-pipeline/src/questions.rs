//! Question derivation: gates, conflicts, and the traversal queue
//!
//! This stage needs upstream claim structure the core pipeline does not
//! produce, so it is a separate entry point rather than part of
//! [`crate::Pipeline::run`]. It is synchronous and total: malformed claim
//! data degrades to excluded candidates, never errors.

use crate::config::PipelineConfig;
use crate::pipeline::EvidenceGraph;
use prism_domain::{ClaimGraph, Conflict, StatementId};
use prism_gates::{derive_conflicts, derive_gates, GateOutcome, TermIndex, TermIndexCache};
use prism_traversal::{merge_questions, MergeContext, MergeOutcome, PartitionInput};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Inputs produced by upstream graph analysis.
#[derive(Debug, Clone, Default)]
pub struct QuestionInputs {
    /// Claim graph (claims, edges, roles); sanitized before derivation
    pub claim_graph: ClaimGraph,
    /// Claim partitions normalized for the traversal merge
    pub partitions: Vec<PartitionInput>,
    /// Precomputed per-statement disruption scores
    pub disruption: HashMap<StatementId, f64>,
    /// Statements already pruned by earlier decisions in this conversation
    pub pruned: HashSet<StatementId>,
    /// Conversational turn id, keys the term-index cache
    pub turn_id: String,
}

/// Everything question derivation produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TraversalOutcome {
    /// Gates plus the per-claim audit record
    pub gates: GateOutcome,
    /// Filtered, gate-cross-referenced conflicts
    pub conflicts: Vec<Conflict>,
    /// The merged traversal queue
    pub questions: MergeOutcome,
}

/// Derive gates, conflicts, and the traversal queue from claim structure.
pub fn derive_questions(
    evidence: &EvidenceGraph,
    inputs: &QuestionInputs,
    cache: &mut TermIndexCache,
    config: &PipelineConfig,
) -> TraversalOutcome {
    let graph = inputs.claim_graph.clone().sanitized();
    let statement_texts: HashMap<StatementId, String> = evidence
        .statements
        .iter()
        .map(|s| (s.id, s.text.clone()))
        .collect();

    let index = cache.get_or_build(&inputs.turn_id, || {
        TermIndex::build(
            statement_texts.values().map(|s| s.as_str()),
            config.gates.term_min_len,
        )
    });

    let vectors = if evidence.statement_vectors.is_empty() {
        None
    } else {
        Some(&evidence.statement_vectors)
    };
    let gates = derive_gates(&graph, &statement_texts, vectors, &index, &config.gates);
    let conflicts = derive_conflicts(&graph, &gates.gates, &config.gates);

    let ctx = MergeContext {
        disruption: Some(&inputs.disruption),
        statement_vectors: vectors,
        pruned: Some(&inputs.pruned),
    };
    let questions = merge_questions(&gates.gates, &inputs.partitions, ctx, &config.traversal);

    info!(
        "Question derivation: {} gates, {} conflicts, {} active questions",
        gates.gates.len(),
        conflicts.len(),
        questions.questions.len()
    );
    TraversalOutcome {
        gates,
        conflicts,
        questions,
    }
}
