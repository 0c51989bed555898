//! End-to-end orchestration of the evidence-structuring stages

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use prism_classifier::build_prototypes;
use prism_cluster::{cluster, ClusterItem, ClusteringResult};
use prism_domain::{Paragraph, Statement, StatementId};
use prism_embedding::{fetch_in_batches, EmbeddingProvider, LabelEmbeddingCache};
use prism_extractor::{
    project_paragraphs, ClassificationContext, ExtractionReport, Extractor, ModelResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Audit metadata for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Unique, time-ordered run id
    pub run_id: String,
    /// Responses ingested
    pub response_count: usize,
    /// Statements extracted
    pub statement_count: usize,
    /// Paragraphs projected
    pub paragraph_count: usize,
    /// Clusters produced
    pub cluster_count: usize,
    /// Wall-clock duration
    pub duration_ms: u64,
}

/// Everything the pipeline produces from raw responses: the structured
/// evidence consumed by gate/conflict/traversal derivation and by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceGraph {
    /// Run audit metadata
    pub run: RunMetadata,
    /// Atomic statements with provenance
    pub statements: Vec<Statement>,
    /// Paragraph projection of the statements
    pub paragraphs: Vec<Paragraph>,
    /// Clusters plus summary metrics
    pub clustering: ClusteringResult,
    /// Extraction counters
    pub report: ExtractionReport,
    /// Per-statement vectors, kept for downstream coherence checks.
    /// Empty when embedding classification was disabled.
    pub statement_vectors: HashMap<StatementId, Vec<f32>>,
}

/// The pipeline: extraction, projection, embedding, clustering.
pub struct Pipeline<P: EmbeddingProvider> {
    provider: P,
    cache: LabelEmbeddingCache,
    config: PipelineConfig,
}

impl<P: EmbeddingProvider> Pipeline<P> {
    /// Create a pipeline around an embedding provider.
    pub fn new(provider: P, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            provider,
            cache: LabelEmbeddingCache::new(),
            config,
        })
    }

    /// Run the pipeline over a set of model responses.
    ///
    /// The embedding fetch is the only fallible stage; everything else
    /// degrades (singleton clusters, pattern classification) rather than
    /// failing.
    pub async fn run(&self, responses: &[ModelResponse]) -> Result<EvidenceGraph, PipelineError> {
        let started = Instant::now();
        let run_id = Uuid::now_v7().to_string();
        info!("Pipeline run {} over {} responses", run_id, responses.len());

        let extractor = Extractor::new(self.config.extractor.clone());
        let (output, statement_vectors) = if self.config.embedding_classification {
            // First pass finds the sentences; their vectors and the frozen
            // label prototypes then drive the embedding strategy on the
            // second pass. Both passes segment identically, so the id
            // sequence is stable.
            let draft = extractor.extract(responses, &ClassificationContext::Pattern);
            let texts: Vec<String> = draft.statements.iter().map(|s| s.text.clone()).collect();
            let vectors =
                fetch_in_batches(&self.provider, &texts, self.config.embedding_batch_size).await?;
            let by_text: HashMap<String, Vec<f32>> =
                texts.iter().cloned().zip(vectors.iter().cloned()).collect();
            let prototypes = build_prototypes(
                &self.provider,
                &self.cache,
                &self.config.embedding_model_id,
            )
            .await?;

            let output = extractor.extract(
                responses,
                &ClassificationContext::Embedding {
                    prototypes: &prototypes,
                    vectors: &by_text,
                },
            );
            let statement_vectors: HashMap<StatementId, Vec<f32>> = output
                .statements
                .iter()
                .filter_map(|s| by_text.get(&s.text).map(|v| (s.id, v.clone())))
                .collect();
            (output, statement_vectors)
        } else {
            let output = extractor.extract(responses, &ClassificationContext::Pattern);
            (output, HashMap::new())
        };

        let paragraphs = project_paragraphs(&output.statements, &output.paragraph_texts);
        let items = self
            .paragraph_items(&paragraphs, &output.statements)
            .await?;
        let clustering = cluster(&items, &self.config.clustering);

        let run = RunMetadata {
            run_id,
            response_count: responses.len(),
            statement_count: output.statements.len(),
            paragraph_count: paragraphs.len(),
            cluster_count: clustering.summary.cluster_count,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            "Pipeline run {} complete: {} statements, {} paragraphs, {} clusters in {}ms",
            run.run_id, run.statement_count, run.paragraph_count, run.cluster_count, run.duration_ms
        );

        Ok(EvidenceGraph {
            run,
            statements: output.statements,
            paragraphs,
            clustering,
            report: output.report,
            statement_vectors,
        })
    }

    /// Build clustering items: one per paragraph, embedded over the unclipped
    /// statement texts rather than any display-clipped surface form.
    async fn paragraph_items(
        &self,
        paragraphs: &[Paragraph],
        statements: &[Statement],
    ) -> Result<Vec<ClusterItem>, PipelineError> {
        let by_id: HashMap<StatementId, &Statement> =
            statements.iter().map(|s| (s.id, s)).collect();
        let texts: Vec<String> = paragraphs
            .iter()
            .map(|p| {
                p.statement_ids
                    .iter()
                    .filter_map(|id| by_id.get(id).map(|s| s.text.as_str()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let vectors =
            fetch_in_batches(&self.provider, &texts, self.config.embedding_batch_size).await?;

        Ok(paragraphs
            .iter()
            .zip(vectors)
            .map(|(paragraph, vector)| ClusterItem {
                vector: Some(vector),
                stance: paragraph.dominant_stance,
                model_index: paragraph.key.model_index,
                contested: paragraph.contested,
                signals: paragraph.signals,
                text: paragraph.text.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_embedding::MockEmbeddingProvider;

    fn respond(model: usize, text: &str) -> ModelResponse {
        ModelResponse {
            model_origin_index: model,
            text: text.to_string(),
        }
    }

    fn pipeline(embedding_classification: bool) -> Pipeline<MockEmbeddingProvider> {
        let mut config = PipelineConfig::default();
        config.embedding_classification = embedding_classification;
        Pipeline::new(MockEmbeddingProvider::new(64), config).unwrap()
    }

    #[tokio::test]
    async fn test_pattern_only_run() {
        let graph = pipeline(false)
            .run(&[
                respond(0, "You should always take a backup before migrating."),
                respond(1, "Never run schema changes without a rollback plan."),
            ])
            .await
            .unwrap();
        assert_eq!(graph.run.response_count, 2);
        assert_eq!(graph.statements.len(), 2);
        assert_eq!(graph.paragraphs.len(), 2);
        assert!(graph.statement_vectors.is_empty());
        assert_eq!(
            graph.clustering.summary.item_count,
            graph.paragraphs.len()
        );
    }

    #[tokio::test]
    async fn test_embedding_run_attaches_statement_vectors() {
        let graph = pipeline(true)
            .run(&[respond(
                0,
                "You should always take a backup before migrating.",
            )])
            .await
            .unwrap();
        assert_eq!(graph.statements.len(), 1);
        assert_eq!(graph.statement_vectors.len(), 1);
        let vector = graph.statement_vectors.values().next().unwrap();
        assert_eq!(vector.len(), 64);
    }

    #[tokio::test]
    async fn test_deterministic_across_runs() {
        let responses = vec![
            respond(0, "You should always take a backup before migrating.\n\nPostgres handles concurrent writers better than SQLite."),
            respond(1, "Never run schema changes without a rollback plan."),
        ];
        let first = pipeline(true).run(&responses).await.unwrap();
        let second = pipeline(true).run(&responses).await.unwrap();
        assert_eq!(first.statements, second.statements);
        assert_eq!(first.paragraphs, second.paragraphs);
        assert_eq!(first.clustering.clusters, second.clustering.clusters);
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_graph() {
        let graph = pipeline(false).run(&[]).await.unwrap();
        assert!(graph.statements.is_empty());
        assert!(graph.paragraphs.is_empty());
        assert_eq!(graph.clustering.summary.cluster_count, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.embedding_batch_size = 0;
        assert!(Pipeline::new(MockEmbeddingProvider::new(64), config).is_err());
    }
}
