//! Per-document processing record.
//!
//! A manifest is written once a document's chunks are stored and the
//! inverted index referencing them has been saved. Its presence is
//! what marks the document as processed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{Chunk, ChunkAddress};

/// Record of one processed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentManifest {
    /// Identifier derived from the document's path
    pub document_id: String,

    /// Source document as seen during indexing
    pub source_path: PathBuf,

    /// Storage files holding the document's chunks, in order
    pub storage_files: Vec<PathBuf>,

    /// Total number of chunks stored
    pub chunk_count: usize,

    /// When processing finished
    pub processed_at: DateTime<Utc>,
}

impl DocumentManifest {
    /// Build a manifest from the output of [`ChunkStore::append`].
    ///
    /// [`ChunkStore::append`]: crate::core::storage::ChunkStore::append
    pub fn new(
        document_id: impl Into<String>,
        source_path: PathBuf,
        stored: &[(ChunkAddress, Chunk)],
    ) -> Self {
        let mut storage_files: Vec<PathBuf> = Vec::new();
        for (address, _) in stored {
            if storage_files.last() != Some(&address.storage_file) {
                storage_files.push(address.storage_file.clone());
            }
        }

        Self {
            document_id: document_id.into(),
            source_path,
            storage_files,
            chunk_count: stored.len(),
            processed_at: Utc::now(),
        }
    }
}

/// Derive a document id from a path relative to the indexed root.
///
/// Path separators become `__` and any character outside
/// `[A-Za-z0-9._-]` becomes `_`, so the id is safe to use as a file
/// name prefix. Distinct relative paths map to distinct ids except
/// for names that differ only in replaced characters.
pub fn document_id_for(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_string_lossy()
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("__")
}
