//! N-gram overlap search.
//!
//! Candidates are every chunk posted under at least one query n-gram.
//! Each candidate is scored by the fraction of query n-grams found in
//! its content, ranked best first, and cut to `k`.

use std::collections::HashSet;
use std::time::Instant;

use crate::core::config::SearchConfig;
use crate::core::error::{ChunkdexError, Result};
use crate::core::search::query::{prepare_query, relevance, PreparedQuery};
use crate::core::storage::{ChunkAccessor, InvertedIndex};
use crate::core::types::{ChunkAddress, SearchHit, SearchRequest, SearchResponse};

/// Stateless query executor
#[derive(Debug, Clone)]
pub struct QueryEngine {
    max_ngram: usize,
    default_k: usize,
    max_k: usize,
    max_query_length: usize,
    min_relevance: Option<f64>,
}

impl QueryEngine {
    /// Create an engine; `max_ngram` must match the one used at
    /// indexing time
    pub fn new(config: &SearchConfig, max_ngram: usize) -> Self {
        Self {
            max_ngram,
            default_k: config.default_k,
            max_k: config.max_k,
            max_query_length: config.max_query_length,
            min_relevance: config.min_relevance,
        }
    }

    /// Number of hits to return for a requested `k`
    pub fn effective_k(&self, k: Option<usize>) -> usize {
        k.unwrap_or(self.default_k).min(self.max_k)
    }

    /// Run a query against `index`, loading chunks through `chunks`.
    ///
    /// Candidates whose chunk cannot be loaded are dropped with a
    /// warning. Ties keep the order in which candidates were first
    /// seen in the posting lists. A requested `min_relevance` outside
    /// `[0, 1]` is rejected as an invalid query.
    pub fn search(
        &self,
        request: &SearchRequest,
        index: &InvertedIndex,
        chunks: &mut dyn ChunkAccessor,
    ) -> Result<SearchResponse> {
        let start = Instant::now();

        if let Some(min) = request.min_relevance {
            if !(0.0..=1.0).contains(&min) {
                return Err(ChunkdexError::InvalidQuery(format!(
                    "Min relevance must be between 0 and 1, got {min}"
                )));
            }
        }

        let query = prepare_query(&request.query, self.max_ngram, self.max_query_length)?;
        let k = self.effective_k(request.k);
        let min_relevance = request.min_relevance.or(self.min_relevance);

        let candidates = collect_candidates(index, &query);
        let hits = if query.is_empty() || k == 0 {
            Vec::new()
        } else {
            rank(&query, &candidates, chunks, k, min_relevance)
        };

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "Query '{}': {} n-grams, {} candidates, {} hits in {}ms",
            query.normalized,
            query.n_grams.len(),
            candidates.len(),
            hits.len(),
            duration_ms
        );

        Ok(SearchResponse {
            query: request.query.clone(),
            count: hits.len(),
            hits,
            candidates: candidates.len(),
            duration_ms,
        })
    }
}

/// Union of the posting lists of the query's n-grams, deduplicated in
/// first-seen order
pub fn collect_candidates(index: &InvertedIndex, query: &PreparedQuery) -> Vec<ChunkAddress> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for n_gram in &query.n_grams {
        for address in index.lookup(n_gram) {
            if seen.insert(address) {
                candidates.push(address.clone());
            }
        }
    }

    candidates
}

fn rank(
    query: &PreparedQuery,
    candidates: &[ChunkAddress],
    chunks: &mut dyn ChunkAccessor,
    k: usize,
    min_relevance: Option<f64>,
) -> Vec<SearchHit> {
    let mut hits = Vec::with_capacity(candidates.len());

    for address in candidates {
        let chunk = match chunks.load_chunk(address) {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!("Dropping candidate {}: {}", address, e);
                continue;
            }
        };

        let score = relevance(&query.n_grams, &chunk.content);
        if min_relevance.is_some_and(|min| score < min) {
            continue;
        }

        hits.push(SearchHit {
            address: address.clone(),
            score,
            content: chunk.content,
        });
    }

    // Stable: equal scores keep candidate order
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(k);
    hits
}
