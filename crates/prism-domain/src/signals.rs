//! Signals - independent boolean properties of a statement

use serde::{Deserialize, Serialize};

/// Boolean properties of a statement, orthogonal to stance.
///
/// Each signal is classified independently; none is gated by the stance the
/// classifier picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// The statement asserts an order between steps ("first", "before", "then")
    pub ordering: bool,
    /// The statement expresses a tradeoff or disagreement
    pub tension: bool,
    /// The statement only applies under a condition ("if", "when", "unless")
    pub conditionality: bool,
}

impl Signals {
    /// No signals set.
    pub const NONE: Signals = Signals {
        ordering: false,
        tension: false,
        conditionality: false,
    };

    /// Field-wise OR, used when aggregating statements into a paragraph.
    pub fn union(&self, other: Signals) -> Signals {
        Signals {
            ordering: self.ordering || other.ordering,
            tension: self.tension || other.tension,
            conditionality: self.conditionality || other.conditionality,
        }
    }

    /// Whether any signal is set.
    pub fn any(&self) -> bool {
        self.ordering || self.tension || self.conditionality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_is_field_wise_or() {
        let a = Signals {
            ordering: true,
            tension: false,
            conditionality: false,
        };
        let b = Signals {
            ordering: false,
            tension: true,
            conditionality: false,
        };
        let u = a.union(b);
        assert!(u.ordering);
        assert!(u.tension);
        assert!(!u.conditionality);
    }

    #[test]
    fn test_union_with_none_is_identity() {
        let a = Signals {
            ordering: true,
            tension: true,
            conditionality: true,
        };
        assert_eq!(a.union(Signals::NONE), a);
        assert_eq!(Signals::NONE.union(a), a);
    }

    #[test]
    fn test_any() {
        assert!(!Signals::NONE.any());
        assert!(Signals {
            conditionality: true,
            ..Signals::NONE
        }
        .any());
    }
}
