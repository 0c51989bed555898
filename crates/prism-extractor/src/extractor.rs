//! Core statement extraction

use crate::config::ExtractorConfig;
use crate::segment;
use prism_classifier::{Classifier, LabelPrototypes};
use prism_domain::{
    ClassificationProvenance, FallbackReason, ParagraphKey, Statement, StatementId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// One raw model response: which model produced it and what it said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Index of the originating model in the panel
    pub model_origin_index: usize,
    /// Raw response text
    pub text: String,
}

/// How sentences should be classified for this run.
pub enum ClassificationContext<'a> {
    /// Pattern strategy by configuration
    Pattern,
    /// Pattern strategy because no embedding pipeline exists this run;
    /// recorded as a fallback for audit
    PatternFallback,
    /// Embedding strategy with per-sentence vectors keyed by sentence text
    Embedding {
        /// Frozen label prototypes
        prototypes: &'a LabelPrototypes,
        /// Sentence text to unit vector
        vectors: &'a HashMap<String, Vec<f32>>,
    },
}

/// Counters describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Sentences examined (after structural filtering)
    pub sentences_seen: usize,
    /// Statements emitted
    pub statements_emitted: usize,
    /// Sentences dropped for being under the word floor
    pub dropped_short: usize,
    /// Lines dropped as markdown structure
    pub dropped_structural: usize,
    /// Sentences dropped as meta-commentary openers
    pub dropped_meta: usize,
    /// Statements dropped by hard exclusion rules
    pub dropped_excluded: usize,
    /// The sentence cap cut processing short
    pub sentence_cap_hit: bool,
    /// The statement cap cut processing short
    pub statement_cap_hit: bool,
}

/// Output of one extraction run.
pub struct ExtractionOutput {
    /// Emitted statements, ids ascending in document order
    pub statements: Vec<Statement>,
    /// Full original text per surviving paragraph, for evidence display
    pub paragraph_texts: HashMap<ParagraphKey, String>,
    /// Run counters
    pub report: ExtractionReport,
}

/// The Extractor converts raw model responses into atomic statements.
pub struct Extractor {
    classifier: Classifier,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            classifier: Classifier::new(config.classifier),
            config,
        }
    }

    /// Extract statements from a set of model responses.
    ///
    /// Statement ids increase monotonically in document order across the
    /// whole run. Hard caps bound worst-case cost; hitting one is logged and
    /// recorded in the report, never silent.
    pub fn extract(
        &self,
        responses: &[ModelResponse],
        context: &ClassificationContext<'_>,
    ) -> ExtractionOutput {
        let mut statements = Vec::new();
        let mut paragraph_texts = HashMap::new();
        let mut report = ExtractionReport::default();
        let mut next_id = 0u64;

        info!("Starting extraction over {} responses", responses.len());

        'responses: for response in responses {
            for (paragraph_index, paragraph) in segment::split_paragraphs(&response.text) {
                let key = ParagraphKey {
                    model_index: response.model_origin_index,
                    paragraph_index,
                };
                let mut emitted_here = false;

                for (sentence_index, sentence) in self.paragraph_sentences(&paragraph, &mut report)
                {
                    if report.sentences_seen >= self.config.max_sentences {
                        warn!(
                            "Sentence cap {} hit; remaining input unprocessed",
                            self.config.max_sentences
                        );
                        report.sentence_cap_hit = true;
                        break 'responses;
                    }
                    report.sentences_seen += 1;

                    if segment::word_count(&sentence) < self.config.min_words {
                        report.dropped_short += 1;
                        continue;
                    }
                    if segment::is_meta_opener(&sentence) {
                        report.dropped_meta += 1;
                        continue;
                    }

                    let classified = self.classify(&sentence, context);
                    if classified.is_hard_excluded() {
                        debug!("Hard exclusion dropped sentence: {:?}", sentence);
                        report.dropped_excluded += 1;
                        continue;
                    }

                    if statements.len() >= self.config.max_statements {
                        warn!(
                            "Statement cap {} hit; remaining input unprocessed",
                            self.config.max_statements
                        );
                        report.statement_cap_hit = true;
                        break 'responses;
                    }

                    statements.push(Statement {
                        id: StatementId(next_id),
                        model_index: response.model_origin_index,
                        text: sentence,
                        stance: classified.stance,
                        signals: classified.signals,
                        confidence: classified.confidence,
                        paragraph_index,
                        sentence_index,
                        provenance: classified.provenance,
                    });
                    next_id += 1;
                    emitted_here = true;
                }

                if emitted_here {
                    paragraph_texts.insert(key, paragraph);
                }
            }
        }

        report.statements_emitted = statements.len();
        info!(
            "Extraction complete: {} statements from {} sentences ({} short, {} structural, {} meta, {} excluded)",
            report.statements_emitted,
            report.sentences_seen,
            report.dropped_short,
            report.dropped_structural,
            report.dropped_meta,
            report.dropped_excluded
        );

        ExtractionOutput {
            statements,
            paragraph_texts,
            report,
        }
    }

    /// Sentences of a paragraph with structural lines removed, numbered by
    /// their original position.
    fn paragraph_sentences(
        &self,
        paragraph: &str,
        report: &mut ExtractionReport,
    ) -> Vec<(usize, String)> {
        let mut kept = Vec::new();
        let mut sentence_index = 0;
        for line in paragraph.lines() {
            if segment::is_markdown_structural(line) {
                report.dropped_structural += 1;
                continue;
            }
            for sentence in segment::split_sentences(line) {
                kept.push((sentence_index, sentence));
                sentence_index += 1;
            }
        }
        kept
    }

    fn classify(
        &self,
        sentence: &str,
        context: &ClassificationContext<'_>,
    ) -> prism_classifier::ClassifiedSentence {
        match context {
            ClassificationContext::Pattern => self.classifier.classify(sentence, None, None),
            ClassificationContext::PatternFallback => {
                let mut classified = self.classifier.classify(sentence, None, None);
                classified.provenance = ClassificationProvenance::pattern_fallback(
                    FallbackReason::EmbeddingUnavailable,
                );
                classified
            }
            ClassificationContext::Embedding {
                prototypes,
                vectors,
            } => {
                let vector = vectors.get(sentence).map(|v| v.as_slice());
                self.classifier.classify(sentence, vector, Some(prototypes))
            }
        }
    }
}
