//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow for one folder:
//! 1. Open the processed directory, dropping leftovers of a crashed run
//! 2. Load the existing index
//! 3. Walk the folder
//! 4. Extract, chunk and store every document not processed before
//! 5. Save the index, then write the manifests of the new documents

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::analysis::{NounLemmatizer, SnowballStemmer};
use crate::core::config::{Config, IndexingConfig, StorageConfig};
use crate::core::error::{ChunkdexError, Result};
use crate::core::indexer::extractor::{Extraction, FormatRouter, TextExtractor};
use crate::core::indexer::{Chunker, FileWalker};
use crate::core::storage::{document_id_for, DocumentManifest, StorageManager};
use crate::core::types::IndexStats;

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    chunker: Chunker,
    extractor: Box<dyn TextExtractor>,
    indexing: IndexingConfig,
    storage: StorageConfig,
}

impl IndexingPipeline {
    pub fn new(
        chunker: Chunker,
        extractor: Box<dyn TextExtractor>,
        indexing: IndexingConfig,
        storage: StorageConfig,
    ) -> Self {
        Self {
            chunker,
            extractor,
            indexing,
            storage,
        }
    }

    /// Build the pipeline described by `config`.
    ///
    /// Fails if `config` does not validate or the configured lemma
    /// lexicon cannot be read.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let lemmatizer = match &config.chunking.lemma_lexicon {
            Some(path) => {
                let lemmatizer = NounLemmatizer::from_word_list(path)?;
                tracing::info!(
                    "Loaded lemma lexicon {:?} ({} words)",
                    path,
                    lemmatizer.lexicon_len()
                );
                lemmatizer
            }
            None => NounLemmatizer::new(),
        };

        let chunker = Chunker::new(
            config.chunking.limits(),
            Arc::new(SnowballStemmer::english()),
            Arc::new(lemmatizer),
        );

        Ok(Self::new(
            chunker,
            Box::new(FormatRouter::from_config(&config.extraction)),
            config.indexing.clone(),
            config.storage.clone(),
        ))
    }

    /// Index every new document under `root`.
    ///
    /// Documents whose manifest already exists are skipped. A document
    /// that fails to extract or store is logged and skipped; the run
    /// continues. The index is saved before any manifest is written,
    /// so a document is only marked processed once its postings are
    /// on disk.
    pub fn process_folder(&self, root: &Path) -> Result<IndexStats> {
        let start = Instant::now();

        if !root.is_dir() {
            return Err(ChunkdexError::InvalidPath(format!(
                "Folder does not exist: {}",
                root.display()
            )));
        }

        let manager = StorageManager::open(root, &self.storage)?;
        let store = manager.store();

        let discarded = store.discard_incomplete()?;
        if discarded > 0 {
            tracing::warn!("Discarded {} incomplete storage files", discarded);
        }

        let mut index = manager.load_index()?;
        let index_existed = manager.index_path().exists();

        tracing::info!("Starting file collection from {:?}", root);
        let walker =
            FileWalker::from_config(&self.indexing)?.exclude_dir(manager.processed_dir());
        let files = walker.collect_files(root)?;
        tracing::info!("Found {} files to index", files.len());

        let mut stats = IndexStats {
            files_seen: files.len(),
            ..IndexStats::default()
        };
        let mut manifests: Vec<DocumentManifest> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for (idx, file_path) in files.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} files processed", idx, files.len());
            }

            let relative = file_path.strip_prefix(root).unwrap_or(file_path.as_path());
            let document_id = document_id_for(relative);

            if store.is_processed(&document_id) {
                tracing::debug!("Already processed: {:?}", relative);
                stats.documents_already_processed += 1;
                continue;
            }

            if !seen_ids.insert(document_id.clone()) {
                tracing::warn!(
                    "Skipping {:?}: document id '{}' already used in this run",
                    relative,
                    document_id
                );
                stats.files_failed += 1;
                continue;
            }

            let text = match self.extractor.extract(file_path) {
                Ok(Extraction::Text(text)) => text,
                Ok(Extraction::Skip(reason)) => {
                    tracing::debug!("Skipping {:?}: {}", relative, reason);
                    stats.files_unsupported += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Failed to extract {:?}: {}", relative, e);
                    stats.files_failed += 1;
                    continue;
                }
            };

            let chunks = self.chunker.chunk_text(&text);
            let stored = match store.append(&document_id, chunks) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!("Failed to store {:?}: {}", relative, e);
                    stats.files_failed += 1;
                    continue;
                }
            };

            index.build_or_extend(stored.iter().map(|(address, chunk)| (address, chunk)));

            let manifest = DocumentManifest::new(document_id, relative.to_path_buf(), &stored);
            tracing::debug!(
                "Indexed {:?} ({} chunks, {} storage files)",
                relative,
                manifest.chunk_count,
                manifest.storage_files.len()
            );

            stats.documents_indexed += 1;
            stats.chunks_created += manifest.chunk_count;
            stats.storage_files_written += manifest.storage_files.len();
            manifests.push(manifest);
        }

        if !manifests.is_empty() || !index_existed {
            manager.save_index(&index)?;
        }

        for manifest in &manifests {
            store.write_manifest(manifest)?;
        }

        stats.index_keys = index.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} documents indexed, {} already processed, \
             {} unsupported, {} failed, {} chunks created in {}ms",
            stats.documents_indexed,
            stats.documents_already_processed,
            stats.files_unsupported,
            stats.files_failed,
            stats.chunks_created,
            stats.duration_ms
        );

        Ok(stats)
    }
}
