//! Unified service container for chunkdex
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::IndexingPipeline;
use crate::core::search::SearchService;
use crate::core::storage::{IndexVerifier, StorageManager, VerificationReport};
use crate::core::types::IndexStats;
use std::path::Path;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Search service for n-gram queries
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let search = Arc::new(SearchService::new(
            &config.search,
            config.storage.clone(),
            config.chunking.max_ngram,
        ));

        Self {
            search,
            config: Arc::new(config),
        }
    }

    /// Create an IndexingPipeline from the configuration
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        IndexingPipeline::from_config(&self.config)
    }

    /// Index every new document under `folder`
    pub fn index_folder(&self, folder: &Path) -> Result<IndexStats> {
        self.create_pipeline()?.process_folder(folder)
    }

    /// Open the processed directory of an indexed folder
    pub fn open_folder(&self, folder: &Path) -> Result<StorageManager> {
        StorageManager::open_existing(folder, &self.config.storage)
    }

    /// Check every posting of a folder's index against its chunks
    pub fn verify_folder(&self, folder: &Path) -> Result<VerificationReport> {
        let manager = self.open_folder(folder)?;
        let index = manager.load_index()?;
        IndexVerifier::new(&index, manager.store()).verify()
    }
}
