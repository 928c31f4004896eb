//! Writing search hits out as text files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::types::SearchHit;

/// File name for the hit at `rank` (1-based)
fn export_file_name(rank: usize, hit: &SearchHit) -> String {
    let source = hit
        .address
        .storage_file
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(".chunks.json"))
        .unwrap_or("chunk");

    format!("{rank:03}_{source}_{}.txt", hit.address.chunk_id)
}

/// Write each hit's content to its own `.txt` file in `dir`.
///
/// Files are named by rank, storage file and chunk id, so exporting
/// the same response twice overwrites the same files. Returns the
/// written paths in rank order.
pub fn export_hits(hits: &[SearchHit], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let path = dir.join(export_file_name(i + 1, hit));
        fs::write(&path, &hit.content)?;
        written.push(path);
    }

    tracing::debug!("Exported {} hits to {:?}", written.len(), dir);
    Ok(written)
}
