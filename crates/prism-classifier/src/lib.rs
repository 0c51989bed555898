//! Prism Stance/Signal Classifier
//!
//! Classifies a sentence into one of six mutually exclusive stances and three
//! independent boolean signals. Two interchangeable strategies:
//!
//! - **Pattern**: ordered regex trigger tables per stance; the
//!   highest-priority stance with at least one match wins
//! - **Embedding**: cosine similarity against frozen label prototype vectors,
//!   falling back to the pattern strategy (with a recorded reason) when the
//!   embedding pipeline is unavailable
//!
//! Classification never fails: every sentence resolves to a stance with a
//! confidence, defaulting to factual. A post-classification exclusion pass
//! can hard-disqualify a sentence (rhetorical questions, quoted text,
//! meta-commentary) or soften its confidence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod embedding;
pub mod exclusion;
pub mod pattern;
pub mod patterns;
pub mod prototypes;

pub use classifier::{ClassifiedSentence, Classifier, ClassifierConfig};
pub use embedding::StanceScores;
pub use exclusion::{ExclusionAction, ExclusionHit};
pub use prototypes::{build_prototypes, LabelPrototypes};
