//! Folder-level search.
//!
//! Opens a folder's processed directory, loads its index and runs a
//! query with a per-query storage file cache.

use std::path::Path;

use crate::core::config::{SearchConfig, StorageConfig};
use crate::core::error::{ChunkdexError, Result};
use crate::core::search::engine::QueryEngine;
use crate::core::storage::{CachedChunkAccessor, StorageManager};
use crate::core::types::{SearchRequest, SearchResponse};

/// Search service over indexed folders
pub struct SearchService {
    engine: QueryEngine,
    storage: StorageConfig,
}

impl SearchService {
    pub fn new(search: &SearchConfig, storage: StorageConfig, max_ngram: usize) -> Self {
        Self {
            engine: QueryEngine::new(search, max_ngram),
            storage,
        }
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Search the index of `folder`.
    ///
    /// Fails with `NotFound` when the folder was never indexed.
    pub fn search_folder(&self, folder: &Path, request: &SearchRequest) -> Result<SearchResponse> {
        let manager = StorageManager::open_existing(folder, &self.storage)?;
        self.search(&manager, request)
    }

    /// Search an opened processed directory
    pub fn search(&self, manager: &StorageManager, request: &SearchRequest) -> Result<SearchResponse> {
        if !manager.index_path().exists() {
            return Err(ChunkdexError::NotFound(format!(
                "Index file {}",
                manager.index_path().display()
            )));
        }

        let index = manager.load_index()?;
        let mut chunks = CachedChunkAccessor::new(manager.store());

        let response = self.engine.search(request, &index, &mut chunks)?;

        tracing::debug!(
            "Search loaded {} storage files for {} candidates",
            chunks.files_loaded(),
            response.candidates
        );

        Ok(response)
    }
}
