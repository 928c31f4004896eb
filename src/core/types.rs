//! Core data types for chunkdex.
//!
//! This module defines the data structures shared by the chunker,
//! the chunk store, the inverted index and the query engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single chunk of a document, with its derived lexical features.
///
/// `words`, `stemmed_words` and `lemmatized_words` always have the
/// same length and correspond position by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of the chunk inside its storage file
    pub chunk_id: usize,

    /// The literal text slice
    pub content: String,

    /// Lowercase word tokens of `content`
    pub words: Vec<String>,

    /// Stem of each word
    pub stemmed_words: Vec<String>,

    /// Lemma of each word
    pub lemmatized_words: Vec<String>,

    /// Contiguous word sequences (1..=max_n words) joined by a space
    pub n_grams: Vec<String>,
}

impl Chunk {
    /// Membership test over `n_grams`, treating it as a set.
    pub fn contains_ngram(&self, n_gram: &str) -> bool {
        self.n_grams.iter().any(|g| g == n_gram)
    }

    /// UTF-8 size of the content in bytes
    pub fn content_bytes(&self) -> usize {
        self.content.len()
    }
}

/// The stable key of a persisted chunk.
///
/// `storage_file` is relative to the processed-documents directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkAddress {
    pub storage_file: PathBuf,
    pub chunk_id: usize,
}

impl ChunkAddress {
    pub fn new(storage_file: impl Into<PathBuf>, chunk_id: usize) -> Self {
        Self {
            storage_file: storage_file.into(),
            chunk_id,
        }
    }
}

impl fmt::Display for ChunkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.storage_file.display(), self.chunk_id)
    }
}

/// A ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Where the chunk lives
    pub address: ChunkAddress,

    /// Fraction of query n-grams found in the chunk content (0..=1)
    pub score: f64,

    /// Chunk text content
    pub content: String,
}

/// Request to search the index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,

    /// Number of results to return (optional)
    pub k: Option<usize>,

    /// Drop candidates scoring below this fraction (optional)
    pub min_relevance: Option<f64>,
}

/// Response from a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Ranked hits, best first
    pub hits: Vec<SearchHit>,

    /// Number of hits returned
    pub count: usize,

    /// Number of distinct candidate chunks retrieved from the index
    pub candidates: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}

/// Statistics from one indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Regular files found by the walker
    pub files_seen: usize,

    /// Documents chunked and indexed in this run
    pub documents_indexed: usize,

    /// Documents skipped because their output already existed
    pub documents_already_processed: usize,

    /// Files with no extractor for their format
    pub files_unsupported: usize,

    /// Files whose extraction failed
    pub files_failed: usize,

    /// Chunks written in this run
    pub chunks_created: usize,

    /// Storage files finalized in this run
    pub storage_files_written: usize,

    /// Distinct n-gram keys in the index after the run
    pub index_keys: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}
