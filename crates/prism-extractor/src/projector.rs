//! Paragraph projection: regrouping statements by origin

use prism_domain::{Paragraph, ParagraphKey, Signals, Stance, Statement};
use std::collections::BTreeMap;

/// Regroup statements by (model, paragraph) into [`Paragraph`] records.
///
/// Within a group statements are sorted by original sentence order, so the
/// projection is deterministic regardless of input order. The dominant stance
/// is resolved by first checking for a contested pattern (an antagonistic
/// stance pair co-present); otherwise by confidence-weighted vote with
/// priority then lexical tie-breaks.
pub fn project_paragraphs(
    statements: &[Statement],
    paragraph_texts: &std::collections::HashMap<ParagraphKey, String>,
) -> Vec<Paragraph> {
    // BTreeMap keeps paragraphs in (model, paragraph) order.
    let mut groups: BTreeMap<ParagraphKey, Vec<&Statement>> = BTreeMap::new();
    for statement in statements {
        let key = ParagraphKey {
            model_index: statement.model_index,
            paragraph_index: statement.paragraph_index,
        };
        groups.entry(key).or_default().push(statement);
    }

    groups
        .into_iter()
        .map(|(key, mut members)| {
            members.sort_by_key(|s| s.sentence_index);

            let signals = members
                .iter()
                .fold(Signals::NONE, |acc, s| acc.union(s.signals));
            let (dominant_stance, contested) = dominant_stance(&members);

            Paragraph {
                key,
                statement_ids: members.iter().map(|s| s.id).collect(),
                dominant_stance,
                contested,
                signals,
                text: paragraph_texts.get(&key).cloned().unwrap_or_else(|| {
                    members
                        .iter()
                        .map(|s| s.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                }),
            }
        })
        .collect()
}

/// Resolve the dominant stance of a group and whether it is contested.
fn dominant_stance(members: &[&Statement]) -> (Stance, bool) {
    let present: Vec<Stance> = {
        let mut seen = Vec::new();
        for s in members {
            if !seen.contains(&s.stance) {
                seen.push(s.stance);
            }
        }
        seen
    };

    let contested = present
        .iter()
        .any(|a| present.iter().any(|b| a.is_antagonist_of(*b)));

    if contested {
        // The higher-priority present stance characterizes the paragraph.
        let dominant = *present
            .iter()
            .max_by_key(|s| s.priority())
            .expect("non-empty group");
        return (dominant, true);
    }

    // Confidence-weighted vote, ties by priority then lexical stance name.
    let mut votes: Vec<(Stance, f64)> = present
        .iter()
        .map(|&stance| {
            let weight: f64 = members
                .iter()
                .filter(|s| s.stance == stance)
                .map(|s| s.confidence)
                .sum();
            (stance, weight)
        })
        .collect();
    votes.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.0.priority().cmp(&a.0.priority()))
            .then_with(|| a.0.as_str().cmp(b.0.as_str()))
    });

    (votes[0].0, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_domain::{ClassificationProvenance, StatementId};
    use std::collections::HashMap;

    fn statement(
        id: u64,
        model: usize,
        paragraph: usize,
        sentence: usize,
        stance: Stance,
        confidence: f64,
    ) -> Statement {
        Statement {
            id: StatementId(id),
            model_index: model,
            text: format!("statement {id}"),
            stance,
            signals: Signals {
                ordering: id % 2 == 0,
                tension: false,
                conditionality: false,
            },
            confidence,
            paragraph_index: paragraph,
            sentence_index: sentence,
            provenance: ClassificationProvenance::pattern(),
        }
    }

    #[test]
    fn test_groups_by_model_and_paragraph() {
        let statements = vec![
            statement(0, 0, 0, 0, Stance::Factual, 0.6),
            statement(1, 0, 1, 0, Stance::Factual, 0.6),
            statement(2, 1, 0, 0, Stance::Factual, 0.6),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert_eq!(paragraphs.len(), 3);
    }

    #[test]
    fn test_members_sorted_by_sentence_order() {
        let statements = vec![
            statement(5, 0, 0, 2, Stance::Factual, 0.6),
            statement(3, 0, 0, 0, Stance::Factual, 0.6),
            statement(4, 0, 0, 1, Stance::Factual, 0.6),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert_eq!(
            paragraphs[0].statement_ids,
            vec![StatementId(3), StatementId(4), StatementId(5)]
        );
    }

    #[test]
    fn test_contested_antagonist_pair() {
        let statements = vec![
            statement(0, 0, 0, 0, Stance::Directive, 0.9),
            statement(1, 0, 0, 1, Stance::Warning, 0.5),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert!(paragraphs[0].contested);
        // Warning outranks directive in priority order.
        assert_eq!(paragraphs[0].dominant_stance, Stance::Warning);
    }

    #[test]
    fn test_vote_by_summed_confidence() {
        let statements = vec![
            statement(0, 0, 0, 0, Stance::Directive, 0.5),
            statement(1, 0, 0, 1, Stance::Factual, 0.4),
            statement(2, 0, 0, 2, Stance::Factual, 0.4),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert!(!paragraphs[0].contested);
        // 0.8 of factual weight beats 0.5 of directive weight.
        assert_eq!(paragraphs[0].dominant_stance, Stance::Factual);
    }

    #[test]
    fn test_vote_tie_breaks_by_priority() {
        let statements = vec![
            statement(0, 0, 0, 0, Stance::Directive, 0.5),
            statement(1, 0, 0, 1, Stance::Factual, 0.5),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert_eq!(paragraphs[0].dominant_stance, Stance::Directive);
    }

    #[test]
    fn test_signal_union() {
        let statements = vec![
            statement(0, 0, 0, 0, Stance::Factual, 0.6),
            statement(1, 0, 0, 1, Stance::Factual, 0.6),
        ];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        // id 0 carries ordering, id 1 does not; the union keeps it.
        assert!(paragraphs[0].signals.ordering);
    }

    #[test]
    fn test_falls_back_to_joined_statement_text() {
        let statements = vec![statement(0, 0, 0, 0, Stance::Factual, 0.6)];
        let paragraphs = project_paragraphs(&statements, &HashMap::new());
        assert_eq!(paragraphs[0].text, "statement 0");
    }
}
