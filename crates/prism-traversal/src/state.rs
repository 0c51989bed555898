//! Resolution state for the traversal queue
//!
//! Answers prune statements; pruning can settle later questions on its own.
//! Resolution is a total function: unknown or already-settled question ids
//! are ignored rather than rejected.

use crate::config::TraversalConfig;
use crate::merge::{auto_resolves, MergeOutcome};
use prism_domain::{QuestionAnswer, QuestionStatus, StatementId, TraversalQuestion};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Mutable traversal state: the queue plus the growing pruned-statement set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalState {
    questions: Vec<TraversalQuestion>,
    auto_resolved: Vec<TraversalQuestion>,
    pruned: HashSet<StatementId>,
    config: TraversalConfig,
}

impl TraversalState {
    /// Start tracking a freshly merged queue.
    pub fn new(outcome: MergeOutcome, config: TraversalConfig) -> TraversalState {
        TraversalState {
            questions: outcome.questions,
            auto_resolved: outcome.auto_resolved,
            pruned: HashSet::new(),
            config,
        }
    }

    /// Record an answer to a question.
    ///
    /// Answering "no" prunes the question's affected statements (the branch
    /// does not apply to the user); answering "yes" keeps them. Afterwards
    /// the remaining questions are re-evaluated: blockers that resolved are
    /// removed, and questions whose evidence is now mostly pruned
    /// auto-resolve without being asked.
    pub fn resolve(&mut self, question_id: &str, answer: bool, context: Option<String>) {
        let Some(question) = self
            .questions
            .iter_mut()
            .find(|q| q.id == question_id && q.is_active())
        else {
            debug!("Ignoring resolution for unknown or settled question {}", question_id);
            return;
        };

        question.status = QuestionStatus::Answered;
        question.answer = Some(QuestionAnswer {
            value: answer,
            context,
        });
        if !answer {
            self.pruned.extend(question.affected_statement_ids.iter().copied());
        }
        let resolved_id = question.id.clone();
        info!("Question {} answered {}", resolved_id, answer);

        self.unblock(&resolved_id);
        self.reevaluate_auto_resolution();
    }

    /// Active questions still awaiting input, in queue order.
    pub fn active_questions(&self) -> impl Iterator<Item = &TraversalQuestion> {
        self.questions.iter().filter(|q| q.is_active())
    }

    /// The full queue, including answered questions.
    pub fn questions(&self) -> &[TraversalQuestion] {
        &self.questions
    }

    /// Questions settled without being asked, kept for observability.
    pub fn auto_resolved(&self) -> &[TraversalQuestion] {
        &self.auto_resolved
    }

    /// Statements pruned by the decisions so far.
    pub fn pruned(&self) -> &HashSet<StatementId> {
        &self.pruned
    }

    fn unblock(&mut self, resolved_id: &str) {
        for question in &mut self.questions {
            question.blocked_by.retain(|id| id != resolved_id);
            if question.status == QuestionStatus::Blocked && question.blocked_by.is_empty() {
                question.status = QuestionStatus::Pending;
            }
        }
    }

    fn reevaluate_auto_resolution(&mut self) {
        let mut settled: Vec<String> = Vec::new();
        for question in &mut self.questions {
            if !question.is_active() {
                continue;
            }
            if auto_resolves(
                &question.affected_statement_ids,
                &self.pruned,
                self.config.auto_resolve_ratio,
            ) {
                question.status = QuestionStatus::AutoResolved;
                question.answer = Some(QuestionAnswer {
                    value: true,
                    context: None,
                });
                settled.push(question.id.clone());
                debug!("Question {} auto-resolved by pruning", question.id);
            }
        }
        for id in settled {
            self.unblock(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_domain::QuestionKind;

    fn question(id: &str, affected: &[u64], blocked_by: &[&str]) -> TraversalQuestion {
        TraversalQuestion {
            id: id.to_string(),
            kind: QuestionKind::Conditional,
            text: format!("{}?", id),
            priority: 0.5,
            blocked_by: blocked_by.iter().map(|s| s.to_string()).collect(),
            status: if blocked_by.is_empty() {
                QuestionStatus::Pending
            } else {
                QuestionStatus::Blocked
            },
            affected_statement_ids: affected.iter().map(|&n| StatementId(n)).collect(),
            answer: None,
            derived_from: format!("gate_{}", id),
        }
    }

    fn state(questions: Vec<TraversalQuestion>) -> TraversalState {
        TraversalState::new(
            MergeOutcome {
                questions,
                auto_resolved: vec![],
            },
            TraversalConfig::default(),
        )
    }

    #[test]
    fn test_no_answer_prunes_affected_statements() {
        let mut state = state(vec![question("tq_0", &[1, 2, 3], &[])]);
        state.resolve("tq_0", false, None);
        assert_eq!(state.pruned().len(), 3);
        assert_eq!(state.questions()[0].status, QuestionStatus::Answered);
    }

    #[test]
    fn test_yes_answer_prunes_nothing() {
        let mut state = state(vec![question("tq_0", &[1, 2], &[])]);
        state.resolve("tq_0", true, Some("we are a startup".to_string()));
        assert!(state.pruned().is_empty());
        let answer = state.questions()[0].answer.as_ref().unwrap();
        assert!(answer.value);
        assert_eq!(answer.context.as_deref(), Some("we are a startup"));
    }

    #[test]
    fn test_resolution_unblocks_dependents() {
        let mut state = state(vec![
            question("tq_0", &[1], &[]),
            question("tq_1", &[2], &["tq_0"]),
        ]);
        assert_eq!(state.questions()[1].status, QuestionStatus::Blocked);
        state.resolve("tq_0", true, None);
        assert_eq!(state.questions()[1].status, QuestionStatus::Pending);
    }

    #[test]
    fn test_pruning_cascades_into_auto_resolution() {
        // tq_1's evidence is covered by tq_0's; answering no to tq_0 prunes
        // enough of tq_1 to settle it unasked.
        let mut state = state(vec![
            question("tq_0", &[1, 2, 3, 4, 5], &[]),
            question("tq_1", &[4, 5], &[]),
        ]);
        state.resolve("tq_0", false, None);
        assert_eq!(state.questions()[1].status, QuestionStatus::AutoResolved);
        assert!(state.questions()[1].answer.as_ref().unwrap().value);
        assert_eq!(state.active_questions().count(), 0);
    }

    #[test]
    fn test_unknown_question_id_is_ignored() {
        let mut state = state(vec![question("tq_0", &[1], &[])]);
        state.resolve("tq_99", false, None);
        assert!(state.pruned().is_empty());
        assert_eq!(state.questions()[0].status, QuestionStatus::Pending);
    }

    #[test]
    fn test_double_resolution_is_ignored() {
        let mut state = state(vec![question("tq_0", &[1, 2], &[])]);
        state.resolve("tq_0", false, None);
        state.resolve("tq_0", true, None);
        // First answer stands.
        assert!(!state.questions()[0].answer.as_ref().unwrap().value);
        assert_eq!(state.pruned().len(), 2);
    }
}
