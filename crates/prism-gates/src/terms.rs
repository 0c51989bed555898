//! Contrastive term-frequency analysis and the per-turn term index cache
//!
//! When no explicit condition clause exists, the distinguishing vocabulary of
//! a claim's exclusive evidence is surfaced by comparing local term frequency
//! against the whole run's term frequency.

use crate::config::GateConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Common words that never count as distinguishing vocabulary.
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "because", "been", "before", "being", "best", "better",
    "between", "both", "cannot", "could", "does", "doing", "each", "either", "every", "from",
    "have", "having", "here", "into", "just", "like", "made", "make", "makes", "many", "more",
    "most", "much", "need", "needs", "often", "only", "other", "over", "same", "should", "since",
    "some", "such", "than", "that", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "under", "until", "usually", "very", "want", "well", "were", "what",
    "when", "where", "which", "while", "will", "with", "would", "your", "youre",
];

/// Tokenize text into lowercase alphabetic terms of at least `min_len`
/// characters, stopwords removed.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').to_lowercase().replace('\'', ""))
        .filter(|w| w.len() >= min_len && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Term frequencies over the whole run's statement texts.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    counts: HashMap<String, usize>,
    total: usize,
    min_len: usize,
}

impl TermIndex {
    /// Build an index from every statement text in the run.
    pub fn build<'a>(texts: impl IntoIterator<Item = &'a str>, min_len: usize) -> TermIndex {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total = 0;
        for text in texts {
            for term in tokenize(text, min_len) {
                *counts.entry(term).or_insert(0) += 1;
                total += 1;
            }
        }
        TermIndex {
            counts,
            total,
            min_len,
        }
    }

    /// Global relative frequency of a term. Unseen terms get the frequency
    /// of a single occurrence, so local-only vocabulary still ranks finitely.
    pub fn frequency(&self, term: &str) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        let count = self.counts.get(term).copied().unwrap_or(1).max(1);
        count as f64 / self.total as f64
    }

    /// Number of distinct terms indexed.
    pub fn distinct_terms(&self) -> usize {
        self.counts.len()
    }

    /// Minimum term length this index was built with.
    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

/// Surface terms markedly more frequent in the local texts than globally.
///
/// Terms are kept when used at least `term_min_local_count` times locally and
/// their local-vs-global frequency ratio clears `term_ratio_floor`. Output is
/// ranked by descending ratio, ascending term on ties, capped at
/// `term_max_terms`.
pub fn distinguishing_terms(
    local_texts: &[&str],
    index: &TermIndex,
    config: &GateConfig,
) -> Vec<String> {
    let mut local_counts: HashMap<String, usize> = HashMap::new();
    let mut local_total = 0;
    for text in local_texts {
        for term in tokenize(text, config.term_min_len) {
            *local_counts.entry(term).or_insert(0) += 1;
            local_total += 1;
        }
    }
    if local_total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, f64)> = local_counts
        .into_iter()
        .filter(|(_, count)| *count >= config.term_min_local_count)
        .map(|(term, count)| {
            let local = count as f64 / local_total as f64;
            let ratio = local / index.frequency(&term);
            (term, ratio)
        })
        .filter(|(_, ratio)| *ratio >= config.term_ratio_floor)
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(config.term_max_terms);
    ranked.into_iter().map(|(term, _)| term).collect()
}

/// Short-lived cache of term indexes keyed by conversational turn id.
///
/// Strict FIFO: once the capacity is exceeded the oldest entry is evicted,
/// regardless of how recently it was read. Injectable so tests construct
/// isolated instances instead of sharing hidden static state.
#[derive(Debug)]
pub struct TermIndexCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, Arc<TermIndex>>,
}

impl TermIndexCache {
    /// Create a cache holding at most `capacity` turn indexes.
    pub fn new(capacity: usize) -> TermIndexCache {
        TermIndexCache {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    /// Fetch the index for a turn, building it on first access.
    pub fn get_or_build(
        &mut self,
        turn_id: &str,
        build: impl FnOnce() -> TermIndex,
    ) -> Arc<TermIndex> {
        if let Some(index) = self.entries.get(turn_id) {
            return Arc::clone(index);
        }
        let index = Arc::new(build());
        self.entries
            .insert(turn_id.to_string(), Arc::clone(&index));
        self.order.push_back(turn_id.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        index
    }

    /// Number of cached indexes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TermIndexCache {
    fn default() -> Self {
        TermIndexCache::new(5)
    }
}
