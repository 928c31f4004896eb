//! UTF-8 safe text chunking with lexical features.
//!
//! Text is split into fixed windows measured in **characters**, not
//! bytes, so slice boundaries always fall on valid character
//! boundaries. Each slice is then capped at a byte ceiling and
//! analyzed into words, stems, lemmas and n-grams.
//!
//! # Example
//!
//! ```
//! use chunkdex::core::indexer::Chunker;
//!
//! let chunker = Chunker::with_defaults();
//! let chunks = chunker.chunk_text("the quick brown fox jumps");
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].words, vec!["the", "quick", "brown", "fox", "jumps"]);
//! assert!(chunks[0].contains_ngram("the quick brown fox jumps"));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::analysis::{
    generate_ngrams, tokenize, Lemmatizer, NounLemmatizer, SnowballStemmer, Stemmer,
};
use crate::core::types::Chunk;

/// Default characters per chunk
pub const DEFAULT_WINDOW_CHARS: usize = 5000;

/// Default per-chunk content ceiling (15 KiB)
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 15 * 1024;

/// Default longest n-gram, in words
pub const DEFAULT_MAX_NGRAM: usize = 5;

/// Size limits applied while chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkLimits {
    /// Number of characters per slice
    pub window_chars: usize,

    /// Maximum UTF-8 size of a chunk's content
    pub max_chunk_bytes: usize,

    /// Longest n-gram generated, in words
    pub max_ngram: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            window_chars: DEFAULT_WINDOW_CHARS,
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            max_ngram: DEFAULT_MAX_NGRAM,
        }
    }
}

/// UTF-8 safe text chunker.
///
/// The stemmer and lemmatizer are injected so that tests (or other
/// languages) can substitute their own.
#[derive(Clone)]
pub struct Chunker {
    limits: ChunkLimits,
    stemmer: Arc<dyn Stemmer>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("limits", &self.limits)
            .field("stemmer", &self.stemmer.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Panics
    ///
    /// Panics if any of the limits is 0.
    pub fn new(
        limits: ChunkLimits,
        stemmer: Arc<dyn Stemmer>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        assert!(limits.window_chars > 0, "window_chars must be > 0");
        assert!(limits.max_chunk_bytes > 0, "max_chunk_bytes must be > 0");
        assert!(limits.max_ngram > 0, "max_ngram must be > 0");

        Self {
            limits,
            stemmer,
            lemmatizer,
        }
    }

    /// Chunker with default limits, English Snowball stemming and the
    /// built-in noun lemmatizer.
    pub fn with_defaults() -> Self {
        Self::new(
            ChunkLimits::default(),
            Arc::new(SnowballStemmer::english()),
            Arc::new(NounLemmatizer::new()),
        )
    }

    /// Get the configured limits.
    pub fn limits(&self) -> ChunkLimits {
        self.limits
    }

    /// Chunk text into consecutive, non-overlapping slices.
    ///
    /// Every returned chunk satisfies:
    /// - `content.len() <= max_chunk_bytes`
    /// - `words`, `stemmed_words` and `lemmatized_words` have the same
    ///   length
    ///
    /// `chunk_id` is the position of the chunk within `text`. Empty
    /// input produces no chunks; whitespace-only slices still produce
    /// a chunk (with no words).
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        // Byte offset of every character; slicing on these never
        // splits a multi-byte sequence
        let char_offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();

        let mut chunks = Vec::with_capacity(char_offsets.len().div_ceil(self.limits.window_chars));
        let mut char_start = 0;

        while char_start < char_offsets.len() {
            let char_end = (char_start + self.limits.window_chars).min(char_offsets.len());

            let byte_start = char_offsets[char_start];
            let byte_end = if char_end < char_offsets.len() {
                char_offsets[char_end]
            } else {
                text.len()
            };

            let slice = truncate_to_ceiling(&text[byte_start..byte_end], self.limits.max_chunk_bytes);
            if slice.len() < byte_end - byte_start {
                tracing::debug!(
                    "Chunk {} truncated from {} to {} bytes",
                    chunks.len(),
                    byte_end - byte_start,
                    slice.len()
                );
            }

            chunks.push(self.analyze(chunks.len(), slice));
            char_start = char_end;
        }

        chunks
    }

    /// Derive the lexical features of one slice.
    fn analyze(&self, chunk_id: usize, content: &str) -> Chunk {
        let words = tokenize(content);
        let stemmed_words = words.iter().map(|w| self.stemmer.stem(w)).collect();
        let lemmatized_words = words.iter().map(|w| self.lemmatizer.lemmatize(w)).collect();
        let n_grams = generate_ngrams(&words, self.limits.max_ngram);

        Chunk {
            chunk_id,
            content: content.to_string(),
            words,
            stemmed_words,
            lemmatized_words,
            n_grams,
        }
    }
}

/// Cap `slice` at `max_bytes`, backing off to the last space.
///
/// The cut first lands on the nearest character boundary at or below
/// the ceiling; if that prefix contains a space, everything from the
/// last space on is dropped. A prefix without any space is kept whole.
pub fn truncate_to_ceiling(slice: &str, max_bytes: usize) -> &str {
    if slice.len() <= max_bytes {
        return slice;
    }

    let mut end = max_bytes;
    while !slice.is_char_boundary(end) {
        end -= 1;
    }
    let prefix = &slice[..end];

    match prefix.rfind(' ') {
        Some(space) => &prefix[..space],
        None => prefix,
    }
}
