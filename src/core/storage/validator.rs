//! Index soundness checking.
//!
//! Every posting `n_gram -> address` must point at a loadable chunk
//! whose `n_grams` contains the key. Every manifest must list storage
//! files that exist. [`IndexVerifier`] walks the whole index one
//! storage file at a time and reports what does not hold.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::storage::chunk_store::ChunkStore;
use crate::core::storage::inverted_index::InvertedIndex;

/// Problems beyond this many are counted but not described
const MAX_REPORTED_PROBLEMS: usize = 20;

/// Outcome of a verification pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub keys_checked: usize,
    pub postings_checked: usize,
    pub storage_files_checked: usize,
    pub manifests_checked: usize,

    /// Postings whose chunk could not be loaded
    pub missing_chunks: usize,

    /// Postings whose chunk does not contain the key
    pub mismatched_postings: usize,

    /// Storage files named by a manifest but absent on disk
    pub missing_storage_files: usize,

    /// Descriptions of the first problems found
    pub problems: Vec<String>,

    pub is_consistent: bool,
    pub verified_at: String,
}

impl VerificationReport {
    fn record(&mut self, problem: String) {
        if self.problems.len() < MAX_REPORTED_PROBLEMS {
            self.problems.push(problem);
        }
    }
}

/// Checker for an index and the chunk store it references
pub struct IndexVerifier<'a> {
    index: &'a InvertedIndex,
    store: &'a ChunkStore,
}

impl<'a> IndexVerifier<'a> {
    pub fn new(index: &'a InvertedIndex, store: &'a ChunkStore) -> Self {
        Self { index, store }
    }

    /// Verify every posting and every manifest
    pub fn verify(&self) -> Result<VerificationReport> {
        let mut report = VerificationReport {
            keys_checked: self.index.len(),
            postings_checked: 0,
            storage_files_checked: 0,
            manifests_checked: 0,
            missing_chunks: 0,
            mismatched_postings: 0,
            missing_storage_files: 0,
            problems: Vec::new(),
            is_consistent: false,
            verified_at: chrono::Utc::now().to_rfc3339(),
        };

        // storage file -> chunk id -> keys posted for it
        let mut by_file: BTreeMap<&Path, BTreeMap<usize, Vec<&str>>> = BTreeMap::new();
        for (key, addresses) in self.index.iter() {
            for address in addresses {
                by_file
                    .entry(address.storage_file.as_path())
                    .or_default()
                    .entry(address.chunk_id)
                    .or_default()
                    .push(key);
                report.postings_checked += 1;
            }
        }

        for (storage_file, chunks) in &by_file {
            self.verify_file(storage_file, chunks, &mut report);
        }

        self.verify_manifests(&mut report)?;

        report.is_consistent = report.missing_chunks == 0
            && report.mismatched_postings == 0
            && report.missing_storage_files == 0;

        tracing::info!(
            "Verified {} postings over {} storage files: {} missing, {} mismatched",
            report.postings_checked,
            report.storage_files_checked,
            report.missing_chunks,
            report.mismatched_postings
        );

        Ok(report)
    }

    fn verify_file(
        &self,
        storage_file: &Path,
        chunks: &BTreeMap<usize, Vec<&str>>,
        report: &mut VerificationReport,
    ) {
        report.storage_files_checked += 1;

        let loaded = match self.store.load_file(storage_file) {
            Ok(loaded) => loaded,
            Err(e) => {
                report.missing_chunks += chunks.values().map(Vec::len).sum::<usize>();
                report.record(format!("{}: {}", storage_file.display(), e));
                return;
            }
        };

        for (chunk_id, keys) in chunks {
            let Some(chunk) = loaded.get(*chunk_id) else {
                report.missing_chunks += keys.len();
                report.record(format!(
                    "{}#{}: chunk does not exist ({} postings)",
                    storage_file.display(),
                    chunk_id,
                    keys.len()
                ));
                continue;
            };

            let n_grams: HashSet<&str> = chunk.n_grams.iter().map(String::as_str).collect();
            for key in keys {
                if !n_grams.contains(key) {
                    report.mismatched_postings += 1;
                    report.record(format!(
                        "{}#{}: does not contain '{}'",
                        storage_file.display(),
                        chunk_id,
                        key
                    ));
                }
            }
        }
    }

    fn verify_manifests(&self, report: &mut VerificationReport) -> Result<()> {
        for manifest in self.store.list_manifests()? {
            report.manifests_checked += 1;

            let missing: Vec<&PathBuf> = manifest
                .storage_files
                .iter()
                .filter(|name| !self.store.root().join(name).exists())
                .collect();

            for name in missing {
                report.missing_storage_files += 1;
                report.record(format!(
                    "Manifest '{}' lists missing storage file {}",
                    manifest.document_id,
                    name.display()
                ));
            }
        }

        Ok(())
    }
}
