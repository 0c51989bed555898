//! Condition-clause extraction from exclusive evidence

use lazy_static::lazy_static;
use prism_domain::{ConditionKind, ExtractedCondition, StatementId};
use regex::Regex;

const MAX_CLAUSE_CHARS: usize = 80;

lazy_static! {
    static ref CONDITIONAL_CLAUSES: Vec<Regex> = vec![
        Regex::new(r"(?i)\bonly\s+if\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\bif\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\bwhen(?:ever)?\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\bunless\s+([^,.;:!?\n]+)").unwrap(),
    ];
    static ref DEPENDENCY_CLAUSES: Vec<Regex> = vec![
        Regex::new(r"(?i)\bprovided\s+that\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\bdepends?\s+(?:on|upon)\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\bas\s+long\s+as\s+([^,.;:!?\n]+)").unwrap(),
        Regex::new(r"(?i)\brequires?\s+(?:that\s+)?([^,.;:!?\n]+)").unwrap(),
    ];
    static ref AUDIENCE_CLAUSE: Regex = Regex::new(
        r"(?i)\bfor\s+((?:small|large|new|early-stage|growing|established)\s+)?(startups?|enterprises?|teams?|beginners?|individuals?|organi[sz]ations?|compan(?:y|ies)|developers?|students?|agencies)\b"
    )
    .unwrap();
}

/// Extract condition-bearing clauses from a set of exclusive statements.
///
/// Identical normalized clauses found in several statements collapse into a
/// single condition carrying all their ids. Output is sorted by descending
/// support then ascending clause text, so extraction is deterministic.
pub fn extract_conditions(statements: &[(StatementId, &str)]) -> Vec<ExtractedCondition> {
    // Clause -> (kind, supporting ids), in first-seen kind precedence.
    let mut found: Vec<ExtractedCondition> = Vec::new();

    for &(id, text) in statements {
        for regex in CONDITIONAL_CLAUSES.iter() {
            for captures in regex.captures_iter(text) {
                record(&mut found, &captures[1], ConditionKind::Conditional, id);
            }
        }
        for regex in DEPENDENCY_CLAUSES.iter() {
            for captures in regex.captures_iter(text) {
                record(&mut found, &captures[1], ConditionKind::Dependency, id);
            }
        }
        for captures in AUDIENCE_CLAUSE.captures_iter(text) {
            let qualifier = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            let clause = format!("{}{}", qualifier, &captures[2]);
            record(&mut found, &clause, ConditionKind::Audience, id);
        }
    }

    found.sort_by(|a, b| {
        b.source_statement_ids
            .len()
            .cmp(&a.source_statement_ids.len())
            .then_with(|| a.clause.cmp(&b.clause))
    });
    found
}

fn record(
    found: &mut Vec<ExtractedCondition>,
    clause: &str,
    kind: ConditionKind,
    id: StatementId,
) {
    let clause = normalize_clause(clause);
    if clause.is_empty() {
        return;
    }
    if let Some(existing) = found.iter_mut().find(|c| c.clause == clause) {
        if !existing.source_statement_ids.contains(&id) {
            existing.source_statement_ids.push(id);
        }
        return;
    }
    found.push(ExtractedCondition {
        clause,
        kind,
        source_statement_ids: vec![id],
    });
}

/// Lowercase, collapse whitespace, and truncate at a word boundary.
fn normalize_clause(clause: &str) -> String {
    let collapsed = clause.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = collapsed.to_lowercase();
    if lowered.len() <= MAX_CLAUSE_CHARS {
        return lowered;
    }
    // The byte cap can land inside a multi-byte character; back up to the
    // nearest char boundary before preferring a word cut.
    let mut boundary = MAX_CLAUSE_CHARS;
    while !lowered.is_char_boundary(boundary) {
        boundary -= 1;
    }
    match lowered[..boundary].rfind(' ') {
        Some(cut) => lowered[..cut].to_string(),
        None => lowered[..boundary].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(pairs: &[(u64, &str)]) -> Vec<ExtractedCondition> {
        let statements: Vec<(StatementId, &str)> =
            pairs.iter().map(|&(n, t)| (StatementId(n), t)).collect();
        extract_conditions(&statements)
    }

    #[test]
    fn test_if_clause_extracted() {
        let conditions = extract(&[(1, "Use a managed database if you're a startup.")]);
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].clause, "you're a startup");
        assert_eq!(conditions[0].kind, ConditionKind::Conditional);
        assert_eq!(conditions[0].source_statement_ids, vec![StatementId(1)]);
    }

    #[test]
    fn test_shared_clause_collapses_across_statements() {
        let conditions = extract(&[
            (1, "If you're a startup, keep infrastructure minimal."),
            (2, "This only matters if you're a startup."),
        ]);
        assert_eq!(conditions.len(), 1);
        assert_eq!(
            conditions[0].source_statement_ids,
            vec![StatementId(1), StatementId(2)]
        );
    }

    #[test]
    fn test_dependency_clause_extracted() {
        let conditions = extract(&[(3, "The right choice depends on your team size.")]);
        assert_eq!(conditions[0].kind, ConditionKind::Dependency);
        assert_eq!(conditions[0].clause, "your team size");
    }

    #[test]
    fn test_audience_clause_extracted() {
        let conditions = extract(&[(4, "Kubernetes is overkill for small teams.")]);
        assert_eq!(conditions[0].kind, ConditionKind::Audience);
        assert_eq!(conditions[0].clause, "small teams");
    }

    #[test]
    fn test_higher_support_sorts_first() {
        let conditions = extract(&[
            (1, "If you self-host, budget for operations."),
            (2, "When you self-host, patching is on you."),
            (3, "Costs grow if traffic spikes."),
        ]);
        assert!(conditions.len() >= 2);
        assert!(
            conditions[0].source_statement_ids.len() >= conditions[1].source_statement_ids.len()
        );
    }

    #[test]
    fn test_clause_stops_at_punctuation() {
        let conditions = extract(&[(1, "If latency matters, pick the closer region.")]);
        assert_eq!(conditions[0].clause, "latency matters");
    }

    #[test]
    fn test_no_clause_yields_empty() {
        let conditions = extract(&[(1, "PostgreSQL is a relational database.")]);
        assert!(conditions.is_empty());
    }

    #[test]
    fn test_long_clause_truncated_at_word_boundary() {
        let long = format!("If {} then stop.", "verylongword ".repeat(12));
        let conditions = extract(&[(1, &long)]);
        assert!(conditions[0].clause.len() <= 80);
        assert!(!conditions[0].clause.ends_with(' '));
    }

    #[test]
    fn test_multibyte_clause_truncated_on_char_boundary() {
        // Byte 80 of this clause falls inside the two-byte 'é'.
        let long = format!("If {}\u{e9}zzz.", "x".repeat(79));
        let conditions = extract(&[(1, &long)]);
        assert_eq!(conditions[0].clause, "x".repeat(79));
    }

    #[test]
    fn test_multibyte_clause_prefers_word_cut() {
        // Byte 80 again splits the 'é'; the earlier space still wins the cut.
        let long = format!("If costs spike {}\u{e9}t\u{e9} budgets.", "x".repeat(67));
        let conditions = extract(&[(1, &long)]);
        assert_eq!(conditions[0].clause, "costs spike");
    }
}
