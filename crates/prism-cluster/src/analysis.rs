//! Per-cluster analysis: centroid, cohesion, uncertainty, expansion
//!
//! Runs after merging is done. Cohesion scores use raw quantized cosine
//! similarity over the member vectors, not the adjusted distances the engine
//! merges on, so the reported numbers describe the geometry rather than the
//! merge heuristics.

use crate::config::ClusteringConfig;
use crate::engine::ClusterItem;
use prism_domain::{Cluster, ClusterExpansion, ExpansionEntry, UncertaintyReason};
use prism_embedding::{cosine_similarity, mean_vector, quantize, squared_distance};

/// Analyze one final cluster: pick the centroid, score cohesion, evaluate
/// every uncertainty reason independently, and attach a bounded expansion
/// payload when any reason applies.
pub fn analyze_cluster(
    id: usize,
    members: &[usize],
    items: &[ClusterItem],
    config: &ClusteringConfig,
) -> Cluster {
    let centroid = select_centroid(members, items);
    let (cohesion, pairwise_cohesion) = cohesion_scores(members, centroid, items);
    let uncertainty_reasons =
        uncertainty_reasons(members, cohesion, pairwise_cohesion, items, config);
    let expansion = if uncertainty_reasons.is_empty() {
        None
    } else {
        Some(build_expansion(members, centroid, items, config))
    };

    Cluster {
        id,
        members: members.to_vec(),
        centroid,
        cohesion,
        pairwise_cohesion,
        uncertainty_reasons,
        expansion,
    }
}

/// Pick the member closest to the cluster mean vector, lowest index on ties.
pub fn select_centroid(members: &[usize], items: &[ClusterItem]) -> usize {
    let vectors: Vec<&[f32]> = members
        .iter()
        .filter_map(|&m| items[m].vector.as_deref())
        .collect();
    let mean = mean_vector(&vectors);
    if mean.is_empty() {
        return members[0];
    }

    let mut best = members[0];
    let mut best_distance = f64::INFINITY;
    for &m in members {
        let Some(vector) = &items[m].vector else {
            continue;
        };
        let d = squared_distance(vector, &mean);
        // Strict improvement keeps the lowest member index on ties.
        if d < best_distance {
            best = m;
            best_distance = d;
        }
    }
    best
}

/// Cohesion to the centroid and average pairwise cohesion, both quantized.
/// Singletons (or clusters without enough vectors to compare) score 1.0.
fn cohesion_scores(members: &[usize], centroid: usize, items: &[ClusterItem]) -> (f64, f64) {
    let centroid_vector = match &items[centroid].vector {
        Some(v) => v,
        None => return (1.0, 1.0),
    };

    let mut centroid_sims = Vec::new();
    for &m in members {
        if m == centroid {
            continue;
        }
        if let Some(vector) = &items[m].vector {
            centroid_sims.push(cosine_similarity(vector, centroid_vector));
        }
    }
    if centroid_sims.is_empty() {
        return (1.0, 1.0);
    }
    let cohesion = quantize(centroid_sims.iter().sum::<f64>() / centroid_sims.len() as f64);

    let mut pair_sims = Vec::new();
    for (a, &i) in members.iter().enumerate() {
        for &j in &members[a + 1..] {
            if let (Some(vi), Some(vj)) = (&items[i].vector, &items[j].vector) {
                pair_sims.push(cosine_similarity(vi, vj));
            }
        }
    }
    let pairwise = if pair_sims.is_empty() {
        1.0
    } else {
        quantize(pair_sims.iter().sum::<f64>() / pair_sims.len() as f64)
    };

    (cohesion, pairwise)
}

fn uncertainty_reasons(
    members: &[usize],
    cohesion: f64,
    pairwise_cohesion: f64,
    items: &[ClusterItem],
    config: &ClusteringConfig,
) -> Vec<UncertaintyReason> {
    let mut reasons = Vec::new();

    if cohesion < config.cohesion_floor {
        reasons.push(UncertaintyReason::LowCohesion);
    }

    // Dumbbell: acceptable centroid cohesion masking two distant sub-groups.
    if members.len() >= config.dumbbell_min_members
        && cohesion >= config.cohesion_floor
        && cohesion - pairwise_cohesion >= config.dumbbell_gap
    {
        reasons.push(UncertaintyReason::Dumbbell);
    }

    if members.len() > config.max_members {
        reasons.push(UncertaintyReason::TooManyMembers);
    }

    let mut stances: Vec<_> = members.iter().map(|&m| items[m].stance).collect();
    stances.sort_by_key(|s| s.priority());
    stances.dedup();
    if stances.len() >= config.max_distinct_stances {
        reasons.push(UncertaintyReason::StanceDiversity);
    }

    let contested = members.iter().filter(|&&m| items[m].contested).count();
    if contested as f64 / members.len() as f64 > config.contested_ratio_threshold {
        reasons.push(UncertaintyReason::ContestedRatio);
    }

    let tension = members.iter().any(|&m| items[m].signals.tension);
    let conditionality = members.iter().any(|&m| items[m].signals.conditionality);
    if tension && conditionality {
        reasons.push(UncertaintyReason::TensionWithConditionality);
    }

    reasons
}

/// Centroid-first expansion payload: remaining members ascending by
/// similarity to the centroid (most distant first), cut off by the member
/// and character budgets.
fn build_expansion(
    members: &[usize],
    centroid: usize,
    items: &[ClusterItem],
    config: &ClusteringConfig,
) -> ClusterExpansion {
    let centroid_vector = items[centroid].vector.as_ref();

    let mut ranked: Vec<(usize, f64)> = members
        .iter()
        .filter(|&&m| m != centroid)
        .map(|&m| {
            let sim = match (centroid_vector, &items[m].vector) {
                (Some(cv), Some(v)) => cosine_similarity(v, cv),
                _ => 0.0,
            };
            (m, sim)
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut entries = vec![ExpansionEntry {
        item: centroid,
        similarity_to_centroid: 1.0,
        text: items[centroid].text.clone(),
    }];
    let mut chars = items[centroid].text.chars().count();
    let mut truncated = false;

    for (m, sim) in ranked {
        let text = &items[m].text;
        let cost = text.chars().count();
        if entries.len() >= config.expansion_max_members
            || chars + cost > config.expansion_char_budget
        {
            truncated = true;
            break;
        }
        chars += cost;
        entries.push(ExpansionEntry {
            item: m,
            similarity_to_centroid: sim,
            text: text.clone(),
        });
    }

    ClusterExpansion { entries, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_domain::{Signals, Stance};

    fn item(vector: Vec<f32>, stance: Stance, text: &str) -> ClusterItem {
        ClusterItem {
            vector: Some(vector),
            stance,
            model_index: 0,
            contested: false,
            signals: Signals::NONE,
            text: text.to_string(),
        }
    }

    fn config() -> ClusteringConfig {
        ClusteringConfig::default()
    }

    #[test]
    fn test_centroid_is_member_closest_to_mean() {
        // Two lobes at 0 and 60 degrees with one member in the middle.
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![1.0, 0.0], Stance::Factual, "b"),
            item(vec![0.866_025, 0.5], Stance::Factual, "middle"),
            item(vec![0.5, 0.866_025], Stance::Factual, "c"),
            item(vec![0.5, 0.866_025], Stance::Factual, "d"),
        ];
        let members = vec![0, 1, 2, 3, 4];
        assert_eq!(select_centroid(&members, &items), 2);
    }

    #[test]
    fn test_centroid_tie_breaks_to_lowest_index() {
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![1.0, 0.0], Stance::Factual, "b"),
        ];
        assert_eq!(select_centroid(&[0, 1], &items), 0);
    }

    #[test]
    fn test_dumbbell_flagged_without_low_cohesion() {
        // Centroid cohesion cos(30) ~ 0.866 stays over the floor while
        // pairwise drops to ~0.746, a gap over the 0.10 threshold.
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![1.0, 0.0], Stance::Factual, "b"),
            item(vec![0.866_025, 0.5], Stance::Factual, "middle"),
            item(vec![0.5, 0.866_025], Stance::Factual, "c"),
            item(vec![0.5, 0.866_025], Stance::Factual, "d"),
        ];
        let cluster = analyze_cluster(0, &[0, 1, 2, 3, 4], &items, &config());
        assert!(cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::Dumbbell));
        assert!(!cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::LowCohesion));
    }

    #[test]
    fn test_low_cohesion_flagged() {
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![0.0, 1.0], Stance::Factual, "b"),
            item(vec![0.707_107, 0.707_107], Stance::Factual, "c"),
        ];
        let cluster = analyze_cluster(0, &[0, 1, 2], &items, &config());
        assert!(cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::LowCohesion));
        assert!(cluster.expansion.is_some());
    }

    #[test]
    fn test_stance_diversity_flagged() {
        let items = vec![
            item(vec![1.0, 0.0], Stance::Precondition, "a"),
            item(vec![1.0, 0.0], Stance::Directive, "b"),
            item(vec![1.0, 0.0], Stance::Factual, "c"),
        ];
        let cluster = analyze_cluster(0, &[0, 1, 2], &items, &config());
        assert!(cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::StanceDiversity));
    }

    #[test]
    fn test_contested_ratio_flagged() {
        let mut items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![1.0, 0.0], Stance::Factual, "b"),
            item(vec![1.0, 0.0], Stance::Factual, "c"),
        ];
        items[0].contested = true;
        items[1].contested = true;
        let cluster = analyze_cluster(0, &[0, 1, 2], &items, &config());
        assert!(cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::ContestedRatio));
    }

    #[test]
    fn test_tension_with_conditionality_needs_both() {
        let mut items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![1.0, 0.0], Stance::Factual, "b"),
        ];
        items[0].signals.tension = true;
        let cluster = analyze_cluster(0, &[0, 1], &items, &config());
        assert!(!cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::TensionWithConditionality));

        items[1].signals.conditionality = true;
        let cluster = analyze_cluster(0, &[0, 1], &items, &config());
        assert!(cluster
            .uncertainty_reasons
            .contains(&UncertaintyReason::TensionWithConditionality));
    }

    #[test]
    fn test_confident_cluster_has_no_expansion() {
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "a"),
            item(vec![0.995, 0.099_875], Stance::Factual, "b"),
        ];
        let cluster = analyze_cluster(0, &[0, 1], &items, &config());
        assert!(cluster.uncertainty_reasons.is_empty());
        assert!(cluster.expansion.is_none());
    }

    #[test]
    fn test_expansion_centroid_first_then_most_distant() {
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, "centroid text"),
            item(vec![0.9, 0.435_890], Stance::Factual, "near"),
            item(vec![0.0, 1.0], Stance::Directive, "far"),
            item(vec![0.5, 0.866_025], Stance::Hedged, "mid"),
        ];
        let expansion = build_expansion(&[0, 1, 2, 3], 0, &items, &config());
        let order: Vec<usize> = expansion.entries.iter().map(|e| e.item).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
        assert_eq!(expansion.entries[0].similarity_to_centroid, 1.0);
        assert!(!expansion.truncated);
    }

    #[test]
    fn test_expansion_member_budget_truncates() {
        let items: Vec<ClusterItem> = (0..8)
            .map(|i| {
                let angle = i as f32 * 0.1;
                item(vec![angle.cos(), angle.sin()], Stance::Factual, "text")
            })
            .collect();
        let mut cfg = config();
        cfg.expansion_max_members = 3;
        let expansion = build_expansion(&[0, 1, 2, 3, 4, 5, 6, 7], 0, &items, &cfg);
        assert_eq!(expansion.entries.len(), 3);
        assert!(expansion.truncated);
    }

    #[test]
    fn test_expansion_char_budget_truncates() {
        let long = "x".repeat(700);
        let items = vec![
            item(vec![1.0, 0.0], Stance::Factual, &long),
            item(vec![0.9, 0.435_890], Stance::Factual, &long),
            item(vec![0.0, 1.0], Stance::Factual, &long),
        ];
        let expansion = build_expansion(&[0, 1, 2], 0, &items, &config());
        // 1200-char budget fits the centroid but no second 700-char member.
        assert_eq!(expansion.entries.len(), 1);
        assert!(expansion.truncated);
    }
}
