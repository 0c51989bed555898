//! Command execution.

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::input;
use crate::output::Formatter;
use prism_embedding::MockEmbeddingProvider;
use prism_gates::TermIndexCache;
use prism_pipeline::{derive_questions, Pipeline, PipelineConfig, QuestionInputs};
use std::fs;
use tracing::debug;

/// Execute the run command: pipeline, then question derivation when a claims
/// file was supplied.
pub async fn execute_run(args: RunArgs, formatter: &Formatter) -> Result<()> {
    let config = input::load_config(args.config.as_deref())?;
    let responses = input::load_responses(&args.input)?;
    debug!("Loaded {} responses from {}", responses.len(), args.input);

    // The built-in provider is deterministic and offline; a service-backed
    // provider would plug in through the same trait.
    let provider = MockEmbeddingProvider::new(args.dimension);
    let pipeline = Pipeline::new(provider, config.clone())?;
    let graph = pipeline.run(&responses).await?;

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&graph)?)?;
        println!(
            "{}",
            formatter.success(&format!("Evidence graph written to {}", path))
        );
    } else {
        print!("{}", formatter.format_graph(&graph)?);
    }

    if let Some(claims_path) = &args.claims {
        let claims = input::load_claims(claims_path)?;
        let inputs = QuestionInputs {
            claim_graph: claims.claim_graph,
            partitions: claims.partitions,
            disruption: claims.disruption,
            pruned: claims.pruned.into_iter().collect(),
            turn_id: claims
                .turn_id
                .unwrap_or_else(|| format!("run-{}", graph.run.run_id)),
        };
        let mut cache = TermIndexCache::default();
        let outcome = derive_questions(&graph, &inputs, &mut cache, &config);
        print!("{}", formatter.format_outcome(&outcome)?);
    }

    Ok(())
}

/// Execute the config command: print the default configuration as TOML.
pub fn execute_config() -> Result<()> {
    let rendered = toml::to_string_pretty(&PipelineConfig::default())
        .map_err(|e| CliError::Config(e.to_string()))?;
    print!("{}", rendered);
    Ok(())
}
