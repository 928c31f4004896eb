//! Query preparation and relevance scoring.
//!
//! Queries go through the same tokenizer and n-gram generator as
//! chunk content, so every n-gram a query produces can match a key
//! that was indexed for a chunk.

use crate::core::analysis::{generate_ngrams, tokenize};
use crate::core::error::{ChunkdexError, Result};

/// A query reduced to the n-grams used for lookup and scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    /// Trimmed, lowercased query text
    pub normalized: String,

    /// Query words
    pub words: Vec<String>,

    /// 1..=min(max_n, words) n-grams, shortest first
    pub n_grams: Vec<String>,
}

impl PreparedQuery {
    /// True when the query produced no words
    pub fn is_empty(&self) -> bool {
        self.n_grams.is_empty()
    }
}

/// Normalize and expand a query.
///
/// Returns `InvalidQuery` when the query exceeds `max_query_length`
/// characters. A query without any word characters is not an error;
/// it yields an empty [`PreparedQuery`].
///
/// # Examples
///
/// ```
/// use chunkdex::core::search::prepare_query;
///
/// let query = prepare_query("  Brown FOX ", 5, 1000).unwrap();
/// assert_eq!(query.n_grams, vec!["brown", "fox", "brown fox"]);
/// ```
pub fn prepare_query(query: &str, max_ngram: usize, max_query_length: usize) -> Result<PreparedQuery> {
    let length = query.chars().count();
    if length > max_query_length {
        return Err(ChunkdexError::InvalidQuery(format!(
            "Query is {length} characters long (max {max_query_length})"
        )));
    }

    let normalized = query.trim().to_lowercase();
    let words = tokenize(&normalized);
    let n_grams = generate_ngrams(&words, max_ngram);

    Ok(PreparedQuery {
        normalized,
        words,
        n_grams,
    })
}

/// Fraction of `n_grams` occurring in `content`.
///
/// Matching is a plain substring test against the lowercased
/// content, so "cat" also matches inside "concatenate". Returns 0.0
/// for an empty n-gram list.
pub fn relevance(n_grams: &[String], content: &str) -> f64 {
    if n_grams.is_empty() {
        return 0.0;
    }

    let lowered = content.to_lowercase();
    let matched = n_grams
        .iter()
        .filter(|n_gram| lowered.contains(n_gram.as_str()))
        .count();

    matched as f64 / n_grams.len() as f64
}
