//! Chunk storage files.
//!
//! Chunks are persisted as JSON arrays in storage files named
//! `{document_id}.{part:04}.chunks.json`. A storage file is capped at
//! a byte ceiling; when the next chunk would not fit, the current
//! file is finalized and the next part is started with `chunk_id`
//! numbering back at 0.
//!
//! Finalizing writes the whole file to a `.tmp` sibling and renames
//! it into place, so a storage file on disk is either complete or
//! absent. Leftover `.tmp` files belong to an interrupted run and are
//! removed by [`ChunkStore::discard_incomplete`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ChunkdexError, Result};
use crate::core::storage::manifest::DocumentManifest;
use crate::core::types::{Chunk, ChunkAddress};

/// Default storage file ceiling (10 MiB of serialized chunks)
pub const DEFAULT_MAX_STORAGE_FILE_BYTES: usize = 10 * 1024 * 1024;

const STORAGE_FILE_SUFFIX: &str = ".chunks.json";
const MANIFEST_SUFFIX: &str = ".manifest.json";
const INCOMPLETE_SUFFIX: &str = ".tmp";

/// Read access to persisted chunks by address.
pub trait ChunkAccessor {
    /// Load the chunk stored at `address`.
    fn load_chunk(&mut self, address: &ChunkAddress) -> Result<Chunk>;
}

/// File-backed chunk store rooted at the processed-documents directory
#[derive(Debug, Clone)]
pub struct ChunkStore {
    root: PathBuf,
    max_file_bytes: usize,
}

/// Chunks of the storage file currently being filled
struct OpenStorageFile {
    part: usize,
    chunks: Vec<Chunk>,
    /// Serialized size including the JSON array framing
    size: usize,
}

impl OpenStorageFile {
    fn new(part: usize) -> Self {
        Self {
            part,
            chunks: Vec::new(),
            size: 2,
        }
    }

    /// Size of the file after appending a record of `record_len` bytes
    fn size_with(&self, record_len: usize) -> usize {
        let separator = usize::from(!self.chunks.is_empty());
        self.size + separator + record_len
    }

    fn push(&mut self, chunk: Chunk, record_len: usize) {
        self.size = self.size_with(record_len);
        self.chunks.push(chunk);
    }
}

impl ChunkStore {
    /// Open (and create if needed) a store at `root`
    pub fn open(root: impl Into<PathBuf>, max_file_bytes: usize) -> Result<Self> {
        let root = root.into();
        if max_file_bytes == 0 {
            return Err(ChunkdexError::ConfigError(
                "Storage file ceiling must be non-zero".to_string(),
            ));
        }

        fs::create_dir_all(&root)?;

        Ok(Self {
            root,
            max_file_bytes,
        })
    }

    /// Directory holding storage files and manifests
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage file ceiling in bytes
    pub fn max_file_bytes(&self) -> usize {
        self.max_file_bytes
    }

    /// Name of part `part` of a document's storage files
    pub fn storage_file_name(document_id: &str, part: usize) -> PathBuf {
        PathBuf::from(format!("{document_id}.{part:04}{STORAGE_FILE_SUFFIX}"))
    }

    fn manifest_path(&self, document_id: &str) -> PathBuf {
        self.root.join(format!("{document_id}{MANIFEST_SUFFIX}"))
    }

    /// Whether a document's output already exists.
    ///
    /// Only the presence of the manifest is checked; content changes
    /// in the source document are not detected.
    pub fn is_processed(&self, document_id: &str) -> bool {
        self.manifest_path(document_id).exists()
    }

    /// Persist a document's chunks, returning each chunk with its address.
    ///
    /// `chunk_id` of every returned chunk is rewritten to its position
    /// inside its storage file. Chunks keep their input order.
    pub fn append(&self, document_id: &str, chunks: Vec<Chunk>) -> Result<Vec<(ChunkAddress, Chunk)>> {
        let mut stored = Vec::with_capacity(chunks.len());
        let mut current = OpenStorageFile::new(0);

        for mut chunk in chunks {
            chunk.chunk_id = current.chunks.len();
            let mut record_len = serde_json::to_vec(&chunk)?.len();

            if !current.chunks.is_empty() && current.size_with(record_len) > self.max_file_bytes {
                let next_part = current.part + 1;
                let full = std::mem::replace(&mut current, OpenStorageFile::new(next_part));
                stored.extend(self.finalize(document_id, full)?);

                chunk.chunk_id = 0;
                record_len = serde_json::to_vec(&chunk)?.len();
            }

            if current.chunks.is_empty() && record_len + 2 > self.max_file_bytes {
                tracing::warn!(
                    "Chunk of {} bytes exceeds the {} byte storage file ceiling; \
                     writing it to its own file",
                    record_len,
                    self.max_file_bytes
                );
            }

            current.push(chunk, record_len);
        }

        if !current.chunks.is_empty() {
            stored.extend(self.finalize(document_id, current)?);
        }

        Ok(stored)
    }

    /// Write a storage file atomically and address its chunks
    fn finalize(
        &self,
        document_id: &str,
        file: OpenStorageFile,
    ) -> Result<Vec<(ChunkAddress, Chunk)>> {
        let name = Self::storage_file_name(document_id, file.part);
        let path = self.root.join(&name);
        let bytes = serde_json::to_vec(&file.chunks)?;

        write_atomically(&path, &bytes)?;

        tracing::debug!(
            "Finalized storage file {:?} ({} chunks, {} bytes)",
            name,
            file.chunks.len(),
            bytes.len()
        );

        Ok(file
            .chunks
            .into_iter()
            .map(|chunk| (ChunkAddress::new(name.clone(), chunk.chunk_id), chunk))
            .collect())
    }

    /// Load every chunk of a storage file
    pub fn load_file(&self, storage_file: &Path) -> Result<Vec<Chunk>> {
        let path = self.root.join(storage_file);

        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChunkdexError::NotFound(format!("Storage file {storage_file:?}"))
            } else {
                ChunkdexError::IoError(e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            ChunkdexError::Corrupt(format!("Storage file {storage_file:?}: {e}"))
        })
    }

    /// Load the chunk at `address`.
    ///
    /// The whole storage file is read; chunks are not individually
    /// seekable.
    pub fn load(&self, address: &ChunkAddress) -> Result<Chunk> {
        self.load_file(&address.storage_file)?
            .into_iter()
            .nth(address.chunk_id)
            .ok_or_else(|| ChunkdexError::NotFound(format!("Chunk {address}")))
    }

    /// Storage files present on disk, sorted by name
    pub fn list_storage_files(&self) -> Result<Vec<PathBuf>> {
        self.list_with_suffix(STORAGE_FILE_SUFFIX)
    }

    /// Remove `.tmp` files left behind by an interrupted run.
    ///
    /// Returns the number of files removed.
    pub fn discard_incomplete(&self) -> Result<usize> {
        let leftovers = self.list_with_suffix(INCOMPLETE_SUFFIX)?;

        for name in &leftovers {
            tracing::warn!("Discarding incomplete storage file {:?}", name);
            fs::remove_file(self.root.join(name))?;
        }

        Ok(leftovers.len())
    }

    /// Record that a document has been fully processed
    pub fn write_manifest(&self, manifest: &DocumentManifest) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(manifest)?;
        write_atomically(&self.manifest_path(&manifest.document_id), &bytes)
    }

    /// Read a document's manifest
    pub fn read_manifest(&self, document_id: &str) -> Result<DocumentManifest> {
        let path = self.manifest_path(document_id);

        if !path.exists() {
            return Err(ChunkdexError::NotFound(format!(
                "Manifest for document '{document_id}'"
            )));
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ChunkdexError::Corrupt(format!("Manifest {path:?}: {e}")))
    }

    /// All document manifests, sorted by document id
    pub fn list_manifests(&self) -> Result<Vec<DocumentManifest>> {
        let mut manifests = Vec::new();

        for name in self.list_with_suffix(MANIFEST_SUFFIX)? {
            let Some(document_id) = name
                .to_str()
                .and_then(|n| n.strip_suffix(MANIFEST_SUFFIX))
            else {
                continue;
            };

            match self.read_manifest(document_id) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => tracing::warn!("Skipping unreadable manifest {:?}: {}", name, e),
            }
        }

        Ok(manifests)
    }

    fn list_with_suffix(&self, suffix: &str) -> Result<Vec<PathBuf>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(suffix) {
                    names.push(PathBuf::from(name));
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

impl ChunkAccessor for ChunkStore {
    fn load_chunk(&mut self, address: &ChunkAddress) -> Result<Chunk> {
        self.load(address)
    }
}

/// Chunk accessor that reads each storage file at most once.
///
/// Meant to live for one search or one verification pass.
pub struct CachedChunkAccessor<'a> {
    store: &'a ChunkStore,
    files: HashMap<PathBuf, Vec<Chunk>>,
}

impl<'a> CachedChunkAccessor<'a> {
    pub fn new(store: &'a ChunkStore) -> Self {
        Self {
            store,
            files: HashMap::new(),
        }
    }

    /// Number of storage files read so far
    pub fn files_loaded(&self) -> usize {
        self.files.len()
    }
}

impl ChunkAccessor for CachedChunkAccessor<'_> {
    fn load_chunk(&mut self, address: &ChunkAddress) -> Result<Chunk> {
        if !self.files.contains_key(&address.storage_file) {
            let chunks = self.store.load_file(&address.storage_file)?;
            self.files.insert(address.storage_file.clone(), chunks);
        }

        self.files
            .get(&address.storage_file)
            .and_then(|chunks| chunks.get(address.chunk_id))
            .cloned()
            .ok_or_else(|| ChunkdexError::NotFound(format!("Chunk {address}")))
    }
}

/// Write to a temp sibling, then rename into place
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ChunkdexError::InvalidPath(format!("{path:?}")))?;
    let tmp_path = path.with_file_name(format!("{file_name}{INCOMPLETE_SUFFIX}"));

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
