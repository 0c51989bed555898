//! Post-classification exclusion rules
//!
//! A second rule set runs after stance classification and can disqualify a
//! sentence. Hard exclusions drop the statement entirely; soft exclusions
//! only dent its confidence. Rules may be scoped to a stance so they fire
//! only for sentences classified that way.

use lazy_static::lazy_static;
use prism_domain::Stance;
use regex::Regex;

/// What an exclusion hit does to the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionAction {
    /// Drop the statement entirely
    Hard,
    /// Keep the statement with a confidence penalty
    Soft,
}

/// A rule that disqualifies or softens classified sentences.
pub struct ExclusionRule {
    /// Stable rule name for diagnostics
    pub name: &'static str,
    /// Stance scope; `None` applies to every stance
    pub stance: Option<Stance>,
    /// Trigger pattern
    pub pattern: Regex,
    /// Hard or soft
    pub action: ExclusionAction,
}

/// The rule that fired for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionHit {
    /// Name of the rule
    pub rule: &'static str,
    /// Hard or soft
    pub action: ExclusionAction,
}

lazy_static! {
    static ref RULES: Vec<ExclusionRule> = vec![
        ExclusionRule {
            name: "rhetorical_question",
            stance: None,
            pattern: Regex::new(r"\?\s*$").unwrap(),
            action: ExclusionAction::Hard,
        },
        ExclusionRule {
            name: "quoted_text",
            stance: None,
            pattern: Regex::new(r#"^\s*["“>]"#).unwrap(),
            action: ExclusionAction::Hard,
        },
        ExclusionRule {
            name: "meta_commentary",
            stance: None,
            pattern: Regex::new(
                r"(?i)^(as an ai|i cannot|i am unable|i'm unable|it's worth noting|great question|certainly[,!]|sure[,!])"
            )
            .unwrap(),
            action: ExclusionAction::Hard,
        },
        // A directive built around an example is illustration, not advice.
        ExclusionRule {
            name: "directive_example",
            stance: Some(Stance::Directive),
            pattern: Regex::new(r"(?i)\b(for example|for instance|e\.g\.)\b").unwrap(),
            action: ExclusionAction::Soft,
        },
        ExclusionRule {
            name: "first_person_opinion",
            stance: Some(Stance::Hedged),
            pattern: Regex::new(r"(?i)\b(i think|i believe|in my opinion|personally)\b").unwrap(),
            action: ExclusionAction::Soft,
        },
    ];
}

/// Check a classified sentence against the exclusion rules.
///
/// Rules are ordered; the first hit wins, and hard rules are listed before
/// soft ones so a hard disqualification is never shadowed.
pub fn check(sentence: &str, stance: Stance) -> Option<ExclusionHit> {
    RULES
        .iter()
        .filter(|rule| rule.stance.is_none() || rule.stance == Some(stance))
        .find(|rule| rule.pattern.is_match(sentence))
        .map(|rule| ExclusionHit {
            rule: rule.name,
            action: rule.action,
        })
}
