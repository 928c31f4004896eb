//! N-gram inverted index.
//!
//! Maps every n-gram to the addresses of the chunks containing it.
//! The whole index is held in memory and persisted as one JSON
//! document:
//!
//! ```json
//! { "format_version": 1, "postings": { "quick brown": [ { "storage_file": "...", "chunk_id": 0 } ] } }
//! ```
//!
//! Saving rewrites the entire file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ChunkdexError, Result};
use crate::core::storage::chunk_store::write_atomically;
use crate::core::types::{Chunk, ChunkAddress};

/// Version written to and expected from index files
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// In-memory n-gram → chunk address map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    format_version: u32,
    postings: BTreeMap<String, Vec<ChunkAddress>>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            format_version: INDEX_FORMAT_VERSION,
            postings: BTreeMap::new(),
        }
    }

    /// Add a posting for every n-gram of every chunk.
    ///
    /// Postings are appended in chunk order, then n-gram order.
    /// Duplicate addresses under one key are allowed. Returns the
    /// number of postings added.
    pub fn build_or_extend<'a, I>(&mut self, chunks: I) -> usize
    where
        I: IntoIterator<Item = (&'a ChunkAddress, &'a Chunk)>,
    {
        let mut added = 0;

        for (address, chunk) in chunks {
            for n_gram in &chunk.n_grams {
                self.postings
                    .entry(n_gram.clone())
                    .or_default()
                    .push(address.clone());
                added += 1;
            }
        }

        added
    }

    /// Addresses of chunks containing `n_gram`, in posting order
    pub fn lookup(&self, n_gram: &str) -> &[ChunkAddress] {
        self.postings.get(n_gram).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct n-gram keys
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of postings across all keys
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    /// Iterate keys with their postings, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChunkAddress])> {
        self.postings
            .iter()
            .map(|(key, addresses)| (key.as_str(), addresses.as_slice()))
    }

    /// Load an index file.
    ///
    /// Returns `NotFound` when the file is missing and `Corrupt` when
    /// it cannot be parsed or has an unknown format version.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChunkdexError::NotFound(format!("Index file {path:?}")));
        }

        let bytes = fs::read(path)?;
        let index: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ChunkdexError::Corrupt(format!("Index file {path:?}: {e}")))?;

        if index.format_version != INDEX_FORMAT_VERSION {
            return Err(ChunkdexError::Corrupt(format!(
                "Index file {path:?} has format version {}, expected {}",
                index.format_version, INDEX_FORMAT_VERSION
            )));
        }

        tracing::debug!(
            "Loaded index {:?} ({} keys, {} postings)",
            path,
            index.len(),
            index.posting_count()
        );

        Ok(index)
    }

    /// Load an index file, starting empty if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ChunkdexError::NotFound(_)) => Ok(Self::new()),
            other => other,
        }
    }

    /// Persist the whole index, replacing any previous file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec(self)?;
        write_atomically(path, &bytes)?;

        tracing::debug!("Saved index {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }
}
