//! Frozen label prototype vectors for the embedding strategy
//!
//! Each stance and signal label carries three short paraphrase variants; the
//! embedding strategy scores a sentence by its best cosine similarity across
//! a label's variants. Prototype builds go through the single-flight
//! [`LabelEmbeddingCache`] so concurrent classifications share one build.

use prism_domain::Stance;
use prism_embedding::{
    fetch_in_batches, EmbeddingError, EmbeddingProvider, LabelEmbeddingCache, LabelKey,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Paraphrase variants per stance label.
pub fn stance_variants(stance: Stance) -> [&'static str; 3] {
    match stance {
        Stance::Directive => [
            "you should do this",
            "the recommended approach is to use this",
            "make sure to take this step",
        ],
        Stance::Warning => [
            "avoid doing this",
            "this is risky and can go wrong",
            "be careful, this is a common pitfall",
        ],
        Stance::Precondition => [
            "before doing this you need something first",
            "this requires a prerequisite to be in place",
            "you must set this up before starting",
        ],
        Stance::Consequence => [
            "as a result this will happen",
            "doing this leads to that outcome",
            "this causes a downstream effect",
        ],
        Stance::Factual => [
            "this is a statement of fact",
            "the system works in this way",
            "this component provides that capability",
        ],
        Stance::Hedged => [
            "this might be true in some cases",
            "it depends on the situation",
            "this could possibly work but is uncertain",
        ],
    }
}

/// Signal labels, paired with their paraphrase variants.
pub const SIGNAL_LABELS: [&str; 3] = ["ordering", "tension", "conditionality"];

/// Paraphrase variants per signal label.
pub fn signal_variants(label: &str) -> [&'static str; 3] {
    match label {
        "ordering" => [
            "do this first and that second",
            "the steps happen in a fixed order",
            "after one step comes the next step",
        ],
        "tension" => [
            "there is a tradeoff between these options",
            "however, the alternatives disagree",
            "choosing one works against the other",
        ],
        "conditionality" => [
            "this only applies if a condition holds",
            "when the situation is right, do this",
            "it depends on your circumstances",
        ],
        other => panic!("unknown signal label: {other}"),
    }
}

/// Frozen prototype vectors for every stance and signal label.
pub struct LabelPrototypes {
    /// Three vectors per stance, variant order preserved
    pub stances: HashMap<Stance, Arc<Vec<Vec<f32>>>>,
    /// Three vectors per signal label
    pub signals: HashMap<&'static str, Arc<Vec<Vec<f32>>>>,
}

/// Build (or reuse) the full prototype set for `model_id`.
///
/// Each label's variants are fetched at most once per (model, dimension,
/// label) across the process, via the injected cache.
pub async fn build_prototypes<P: EmbeddingProvider + ?Sized>(
    provider: &P,
    cache: &LabelEmbeddingCache,
    model_id: &str,
) -> Result<LabelPrototypes, EmbeddingError> {
    let mut stances = HashMap::new();
    for stance in Stance::ALL {
        let key = LabelKey {
            model_id: model_id.to_string(),
            dimension: provider.dimension(),
            label: stance.as_str().to_string(),
        };
        let vectors = cache
            .get_or_build(key, || async {
                let texts: Vec<String> = stance_variants(stance)
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                fetch_in_batches(provider, &texts, texts.len()).await
            })
            .await?;
        stances.insert(stance, vectors);
    }

    let mut signals = HashMap::new();
    for label in SIGNAL_LABELS {
        let key = LabelKey {
            model_id: model_id.to_string(),
            dimension: provider.dimension(),
            label: label.to_string(),
        };
        let vectors = cache
            .get_or_build(key, || async {
                let texts: Vec<String> =
                    signal_variants(label).iter().map(|s| s.to_string()).collect();
                fetch_in_batches(provider, &texts, texts.len()).await
            })
            .await?;
        signals.insert(label, vectors);
    }

    Ok(LabelPrototypes { stances, signals })
}
