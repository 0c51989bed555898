//! Merging gates and partitions into the traversal queue

use crate::config::TraversalConfig;
use prism_domain::{
    ConditionalGate, QuestionAnswer, QuestionKind, QuestionStatus, StatementId, TraversalQuestion,
};
use prism_embedding::{cosine_similarity, mean_vector, quantize};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A claim partition normalized for merging: a structural fork in the
/// landscape, produced by upstream graph analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionInput {
    /// Upstream partition id
    pub id: String,
    /// Question text presenting the fork
    pub question: String,
    /// Statements whose relevance the fork decides
    pub affected_statement_ids: Vec<StatementId>,
    /// Centroid of the partition's region in embedding space
    pub region_centroid: Option<Vec<f32>>,
}

/// Read-only context the merger consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeContext<'a> {
    /// Precomputed per-statement disruption scores
    pub disruption: Option<&'a HashMap<StatementId, f64>>,
    /// Statement vectors, used to place each gate's evidence region
    pub statement_vectors: Option<&'a HashMap<StatementId, Vec<f32>>>,
    /// Statements already pruned by prior decisions
    pub pruned: Option<&'a HashSet<StatementId>>,
}

/// Result of merging: the active queue plus auto-resolved questions kept
/// separately for observability.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Active questions, priority-descending, renumbered `tq_0..`
    pub questions: Vec<TraversalQuestion>,
    /// Questions settled by prior pruning before they were ever asked
    pub auto_resolved: Vec<TraversalQuestion>,
}

struct Draft {
    source_id: String,
    kind: QuestionKind,
    text: String,
    affected: Vec<StatementId>,
    centroid: Option<Vec<f32>>,
    raw_disruption: f64,
    priority: f64,
    blocked_by: Vec<String>,
}

/// Merge gates and partitions into one prioritized, capped, renumbered queue.
///
/// Priority is each question's maximum per-statement disruption rescaled
/// against the global maximum, plus a fixed boost for partitions. A gate is
/// blocked behind any partition whose region centroid is more similar than
/// the blocking threshold. Questions whose affected set is already mostly
/// pruned auto-resolve with answer yes and never reach the queue.
pub fn merge_questions(
    gates: &[ConditionalGate],
    partitions: &[PartitionInput],
    ctx: MergeContext<'_>,
    config: &TraversalConfig,
) -> MergeOutcome {
    let mut drafts: Vec<Draft> = Vec::new();

    for partition in partitions {
        drafts.push(Draft {
            source_id: partition.id.clone(),
            kind: QuestionKind::Partition,
            text: partition.question.clone(),
            affected: sorted_unique(&partition.affected_statement_ids),
            centroid: partition.region_centroid.clone(),
            raw_disruption: 0.0,
            priority: 0.0,
            blocked_by: Vec::new(),
        });
    }
    for gate in gates {
        let affected = sorted_unique(&gate.source_statement_ids);
        let centroid = gate_region_centroid(&affected, ctx.statement_vectors);
        drafts.push(Draft {
            source_id: gate.id.clone(),
            kind: QuestionKind::Conditional,
            text: gate.question.clone(),
            affected,
            centroid,
            raw_disruption: 0.0,
            priority: 0.0,
            blocked_by: Vec::new(),
        });
    }

    // Priorities: per-question max disruption, rescaled to the global max.
    for draft in &mut drafts {
        draft.raw_disruption = draft
            .affected
            .iter()
            .map(|id| {
                ctx.disruption
                    .and_then(|d| d.get(id).copied())
                    .unwrap_or(0.0)
            })
            .fold(0.0, f64::max);
    }
    let global_max = drafts
        .iter()
        .map(|d| d.raw_disruption)
        .fold(0.0, f64::max);
    for draft in &mut drafts {
        let rescaled = if global_max > 0.0 {
            draft.raw_disruption / global_max
        } else {
            0.0
        };
        let boost = match draft.kind {
            QuestionKind::Partition => config.partition_boost,
            QuestionKind::Conditional => 0.0,
        };
        draft.priority = quantize((rescaled + boost).min(1.0));
    }

    // Blocking: gates sit behind partitions covering the same region.
    let partition_regions: Vec<(String, Vec<f32>)> = drafts
        .iter()
        .filter(|d| d.kind == QuestionKind::Partition)
        .filter_map(|d| d.centroid.clone().map(|c| (d.source_id.clone(), c)))
        .collect();
    for draft in &mut drafts {
        if draft.kind != QuestionKind::Conditional {
            continue;
        }
        let Some(centroid) = &draft.centroid else {
            continue;
        };
        for (partition_id, region) in &partition_regions {
            if region.len() == centroid.len()
                && cosine_similarity(centroid, region) > config.blocking_cosine
            {
                draft.blocked_by.push(partition_id.clone());
            }
        }
    }

    // Auto-resolution against prior pruning.
    let empty = HashSet::new();
    let pruned = ctx.pruned.unwrap_or(&empty);
    let (auto, mut active): (Vec<Draft>, Vec<Draft>) = drafts
        .into_iter()
        .partition(|d| auto_resolves(&d.affected, pruned, config.auto_resolve_ratio));

    let auto_resolved: Vec<TraversalQuestion> = auto
        .into_iter()
        .map(|d| {
            debug!("Question {} auto-resolved before merge", d.source_id);
            to_question(&d, d.source_id.clone(), QuestionStatus::AutoResolved)
        })
        .collect();

    // Final ordering, cap, and stable renumbering.
    active.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.source_id.cmp(&b.source_id))
    });
    active.truncate(config.max_questions);

    let new_ids: HashMap<String, String> = active
        .iter()
        .enumerate()
        .map(|(i, d)| (d.source_id.clone(), format!("tq_{}", i)))
        .collect();

    let questions: Vec<TraversalQuestion> = active
        .iter()
        .enumerate()
        .map(|(i, draft)| {
            // References to questions that fell off the cap are dropped.
            let blocked_by: Vec<String> = draft
                .blocked_by
                .iter()
                .filter_map(|old| new_ids.get(old).cloned())
                .collect();
            let status = if blocked_by.is_empty() {
                QuestionStatus::Pending
            } else {
                QuestionStatus::Blocked
            };
            let mut question = to_question(draft, format!("tq_{}", i), status);
            question.blocked_by = blocked_by;
            question
        })
        .collect();

    info!(
        "Traversal merge: {} gates + {} partitions -> {} active, {} auto-resolved",
        gates.len(),
        partitions.len(),
        questions.len(),
        auto_resolved.len()
    );
    MergeOutcome {
        questions,
        auto_resolved,
    }
}

/// Auto-resolution fires iff the pruned share of the affected set reaches
/// the ratio; a question with no affected statements never auto-resolves.
pub fn auto_resolves(
    affected: &[StatementId],
    pruned: &HashSet<StatementId>,
    ratio: f64,
) -> bool {
    if affected.is_empty() {
        return false;
    }
    let pruned_count = affected.iter().filter(|id| pruned.contains(id)).count();
    pruned_count as f64 / affected.len() as f64 >= ratio
}

fn to_question(draft: &Draft, id: String, status: QuestionStatus) -> TraversalQuestion {
    TraversalQuestion {
        id,
        kind: draft.kind,
        text: draft.text.clone(),
        priority: draft.priority,
        blocked_by: draft.blocked_by.clone(),
        status,
        affected_statement_ids: draft.affected.clone(),
        answer: match status {
            QuestionStatus::AutoResolved => Some(QuestionAnswer {
                value: true,
                context: None,
            }),
            _ => None,
        },
        derived_from: draft.source_id.clone(),
    }
}

fn gate_region_centroid(
    affected: &[StatementId],
    vectors: Option<&HashMap<StatementId, Vec<f32>>>,
) -> Option<Vec<f32>> {
    let vectors = vectors?;
    let member_vectors: Vec<&[f32]> = affected
        .iter()
        .filter_map(|id| vectors.get(id).map(|v| v.as_slice()))
        .collect();
    if member_vectors.is_empty() {
        return None;
    }
    Some(mean_vector(&member_vectors))
}

fn sorted_unique(ids: &[StatementId]) -> Vec<StatementId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
