//! Paragraph - the clustering unit, projected from statements

use crate::signals::Signals;
use crate::stance::Stance;
use crate::statement::StatementId;
use serde::{Deserialize, Serialize};

/// Origin of a paragraph: which model produced it and where in the response.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ParagraphKey {
    /// Index of the originating model in the response list
    pub model_index: usize,
    /// Paragraph index within that model's response
    pub paragraph_index: usize,
}

/// An ordered group of statements sharing model + paragraph origin.
///
/// Built once from statements, immutable thereafter. Member statement ids are
/// kept in original sentence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Model + paragraph origin
    pub key: ParagraphKey,

    /// Member statement ids in sentence order
    pub statement_ids: Vec<StatementId>,

    /// The stance that best characterizes this paragraph
    pub dominant_stance: Stance,

    /// Two polar stances co-occur among members
    pub contested: bool,

    /// Union of member signals
    pub signals: Signals,

    /// Full original paragraph text, retained for evidence display only.
    /// Semantic comparison uses the member statements' unclipped texts.
    pub text: String,
}

impl Paragraph {
    /// Number of member statements.
    pub fn len(&self) -> usize {
        self.statement_ids.len()
    }

    /// Whether the paragraph has no member statements.
    pub fn is_empty(&self) -> bool {
        self.statement_ids.is_empty()
    }
}
