//! Persistence of chunks and the n-gram index.
//!
//! # Architecture
//!
//! - **ChunkStore**: Size-capped JSON storage files of chunk records
//! - **InvertedIndex**: n-gram to chunk address map, saved as one file
//! - **DocumentManifest**: Per-document marker written after indexing
//! - **StorageManager**: Owns a folder's processed directory
//! - **IndexVerifier**: Checks every posting against the stored chunks
//!
//! # Processed Directory Structure
//!
//! ```text
//! {folder}/processed_files/
//! ├── inverted_index.json                  # n-gram -> [ChunkAddress]
//! ├── papers__intro.pdf.0000.chunks.json   # [Chunk, ...]
//! ├── papers__intro.pdf.0001.chunks.json
//! └── papers__intro.pdf.manifest.json      # DocumentManifest
//! ```

mod chunk_store;
mod inverted_index;
mod manager;
mod manifest;
mod validator;

pub use chunk_store::{
    CachedChunkAccessor, ChunkAccessor, ChunkStore, DEFAULT_MAX_STORAGE_FILE_BYTES,
};
pub use inverted_index::{InvertedIndex, INDEX_FORMAT_VERSION};
pub use manager::{StorageManager, StorageStats};
pub use manifest::{document_id_for, DocumentManifest};
pub use validator::{IndexVerifier, VerificationReport};
