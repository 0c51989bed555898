//! Stance - the single semantic role of a statement

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic role a statement plays in an answer.
///
/// Stance is single-valued: every statement holds exactly one. Classification
/// priority runs structural claims over action claims over plain facts, so
/// when several stances could apply the higher-priority one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// "Do X" - a recommendation or instruction
    Directive,
    /// "Avoid X" / "X is risky" - cautionary content
    Warning,
    /// "Before X, you need Y" - an ordering or setup requirement
    Precondition,
    /// "If X then Y follows" - a downstream effect
    Consequence,
    /// A plain statement of fact
    Factual,
    /// "X might / could / possibly" - uncertain or qualified content
    Hedged,
}

impl Stance {
    /// All stances, in classification-priority order (highest first).
    pub const ALL: [Stance; 6] = [
        Stance::Precondition,
        Stance::Consequence,
        Stance::Warning,
        Stance::Directive,
        Stance::Hedged,
        Stance::Factual,
    ];

    /// Classification priority: precondition > consequence > warning >
    /// directive > hedged > factual.
    pub fn priority(&self) -> u8 {
        match self {
            Stance::Precondition => 5,
            Stance::Consequence => 4,
            Stance::Warning => 3,
            Stance::Directive => 2,
            Stance::Hedged => 1,
            Stance::Factual => 0,
        }
    }

    /// Whether two stances form a polar (antagonistic) pair.
    ///
    /// Directive vs warning is "do it" vs "don't"; factual vs hedged is
    /// asserted certainty vs asserted doubt. Co-occurrence of either pair in
    /// one paragraph marks it contested.
    pub fn is_antagonist_of(&self, other: Stance) -> bool {
        matches!(
            (self, other),
            (Stance::Directive, Stance::Warning)
                | (Stance::Warning, Stance::Directive)
                | (Stance::Factual, Stance::Hedged)
                | (Stance::Hedged, Stance::Factual)
        )
    }

    /// Whether two stances form a sequential pair (precondition followed by
    /// consequence), which earns a coherence bonus during similarity
    /// adjustment.
    pub fn is_sequential_with(&self, other: Stance) -> bool {
        matches!(
            (self, other),
            (Stance::Precondition, Stance::Consequence)
                | (Stance::Consequence, Stance::Precondition)
        )
    }

    /// Stable lowercase name, used for lexical tie-breaking.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Directive => "directive",
            Stance::Warning => "warning",
            Stance::Precondition => "precondition",
            Stance::Consequence => "consequence",
            Stance::Factual => "factual",
            Stance::Hedged => "hedged",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Stance::Precondition.priority() > Stance::Consequence.priority());
        assert!(Stance::Consequence.priority() > Stance::Warning.priority());
        assert!(Stance::Warning.priority() > Stance::Directive.priority());
        assert!(Stance::Directive.priority() > Stance::Hedged.priority());
        assert!(Stance::Hedged.priority() > Stance::Factual.priority());
    }

    #[test]
    fn test_all_is_priority_sorted() {
        for pair in Stance::ALL.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn test_antagonist_pairs_are_symmetric() {
        assert!(Stance::Directive.is_antagonist_of(Stance::Warning));
        assert!(Stance::Warning.is_antagonist_of(Stance::Directive));
        assert!(Stance::Factual.is_antagonist_of(Stance::Hedged));
        assert!(Stance::Hedged.is_antagonist_of(Stance::Factual));
    }

    #[test]
    fn test_non_antagonist_pairs() {
        assert!(!Stance::Directive.is_antagonist_of(Stance::Directive));
        assert!(!Stance::Directive.is_antagonist_of(Stance::Factual));
        assert!(!Stance::Precondition.is_antagonist_of(Stance::Consequence));
    }

    #[test]
    fn test_sequential_pair() {
        assert!(Stance::Precondition.is_sequential_with(Stance::Consequence));
        assert!(Stance::Consequence.is_sequential_with(Stance::Precondition));
        assert!(!Stance::Precondition.is_sequential_with(Stance::Precondition));
        assert!(!Stance::Directive.is_sequential_with(Stance::Warning));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Stance::Precondition).unwrap();
        assert_eq!(json, "\"precondition\"");
        let back: Stance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stance::Precondition);
    }
}
