//! Prism Statement Extractor
//!
//! Segments raw model responses into sentences, filters non-substantive
//! text, applies the stance/signal classifier and exclusion rules, and emits
//! atomic statements with provenance. A second pass regroups statements into
//! paragraphs with a dominant stance and aggregated signals.
//!
//! Total sentences and statements per run are hard-capped to bound
//! worst-case cost on pathological input; hitting a cap is logged, never
//! silent.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod extractor;
pub mod projector;
pub mod segment;

pub use config::ExtractorConfig;
pub use extractor::{
    ClassificationContext, ExtractionOutput, ExtractionReport, Extractor, ModelResponse,
};
pub use projector::project_paragraphs;
