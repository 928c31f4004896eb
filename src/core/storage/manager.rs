//! Processed-documents directory management.
//!
//! Every indexed folder gets a processed directory (by default
//! `{folder}/processed_files`) holding the storage files, the
//! per-document manifests and the inverted index file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::core::config::StorageConfig;
use crate::core::error::{ChunkdexError, Result};
use crate::core::storage::chunk_store::ChunkStore;
use crate::core::storage::inverted_index::InvertedIndex;

/// Summary of what a processed directory holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStats {
    pub processed_dir: PathBuf,
    pub documents: usize,
    pub chunks: usize,
    pub storage_files: usize,
    pub storage_bytes: u64,
    pub index_keys: usize,
    pub index_postings: usize,
    pub index_bytes: u64,
}

/// Owner of one folder's processed directory
#[derive(Debug, Clone)]
pub struct StorageManager {
    processed_dir: PathBuf,
    index_path: PathBuf,
    store: ChunkStore,
}

impl StorageManager {
    /// Open the processed directory of `folder`, creating it if needed
    pub fn open(folder: &Path, config: &StorageConfig) -> Result<Self> {
        let processed_dir = folder.join(&config.processed_dir_name);
        let store = ChunkStore::open(&processed_dir, config.max_storage_file_bytes)?;

        Ok(Self {
            index_path: processed_dir.join(&config.index_file_name),
            processed_dir,
            store,
        })
    }

    /// Open the processed directory of an already indexed folder
    pub fn open_existing(folder: &Path, config: &StorageConfig) -> Result<Self> {
        if !folder.is_dir() {
            return Err(ChunkdexError::InvalidPath(format!(
                "Folder does not exist: {}",
                folder.display()
            )));
        }

        let processed_dir = folder.join(&config.processed_dir_name);
        if !processed_dir.is_dir() {
            return Err(ChunkdexError::NotFound(format!(
                "No processed documents under {} (run `chunkdex index` first)",
                folder.display()
            )));
        }

        Self::open(folder, config)
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Load the index, or an empty one if none was saved yet
    pub fn load_index(&self) -> Result<InvertedIndex> {
        InvertedIndex::load_or_default(&self.index_path)
    }

    pub fn save_index(&self, index: &InvertedIndex) -> Result<()> {
        index.save(&self.index_path)
    }

    /// Gather document, chunk and index counts
    pub fn stats(&self) -> Result<StorageStats> {
        let manifests = self.store.list_manifests()?;
        let storage_files = self.store.list_storage_files()?;
        let index = self.load_index()?;

        let storage_bytes = storage_files
            .iter()
            .filter_map(|name| self.processed_dir.join(name).metadata().ok())
            .map(|metadata| metadata.len())
            .sum();

        Ok(StorageStats {
            processed_dir: self.processed_dir.clone(),
            documents: manifests.len(),
            chunks: manifests.iter().map(|m| m.chunk_count).sum(),
            storage_files: storage_files.len(),
            storage_bytes,
            index_keys: index.len(),
            index_postings: index.posting_count(),
            index_bytes: calculate_file_size(&self.index_path),
        })
    }

    /// Total size of everything under the processed directory
    pub fn disk_usage(&self) -> u64 {
        calculate_directory_size(&self.processed_dir)
    }
}

fn calculate_file_size(path: &Path) -> u64 {
    path.metadata().map(|m| m.len()).unwrap_or(0)
}

/// Calculate total size of a directory recursively
fn calculate_directory_size(dir_path: &Path) -> u64 {
    if !dir_path.exists() {
        return 0;
    }

    WalkDir::new(dir_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
