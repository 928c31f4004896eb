//! File system walker with pattern-based filtering.
//!
//! Traverses the document folder in a stable (name-sorted) order and
//! filters files using glob patterns. Walk errors (permission denied,
//! etc.) are logged and skipped.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::IndexingConfig;
use crate::core::error::{ChunkdexError, Result};

/// File system walker with pattern-based filtering
pub struct FileWalker {
    /// Patterns to include (e.g., "*.md", "*.pdf")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/.git/**")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,

    /// Directories never descended into
    excluded_dirs: Vec<PathBuf>,
}

fn compile(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                ChunkdexError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// Returns an error if any pattern is not valid glob syntax.
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: compile(include_patterns, "include")?,
            exclude_patterns: compile(exclude_patterns, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
            excluded_dirs: Vec::new(),
        })
    }

    pub fn from_config(config: &IndexingConfig) -> Result<Self> {
        Self::new(
            &config.include_patterns,
            &config.exclude_patterns,
            config.max_file_size_mb,
        )
    }

    /// Never descend into `dir` (compared as given, so pass the same
    /// form as the walk root uses)
    pub fn exclude_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded_dirs.push(dir.into());
        self
    }

    /// Collect all matching files under `root`, sorted by path
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(ChunkdexError::InvalidPath(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();

                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_size_bytes {
                            tracing::debug!(
                                "Skipping large file: {:?} ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    if self.matches_patterns(path, root) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        Ok(files)
    }

    /// Filters out hidden directories, excluded directories and
    /// directories matching an exclude pattern. Never filters the
    /// root itself.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        if path == root {
            return true;
        }

        if !entry.file_type().is_dir() {
            return true;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                return false;
            }
        }

        if self.excluded_dirs.iter().any(|dir| dir == path) {
            tracing::debug!("Skipping excluded directory: {:?}", path);
            return false;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if self.exclude_patterns.iter().any(|p| p.matches_path(relative)) {
            tracing::debug!("Skipping excluded directory: {:?}", path);
            return false;
        }

        true
    }

    /// Check if a file path matches the include/exclude patterns.
    ///
    /// Patterns see the path relative to `root`, so directories above
    /// the walk root never take part in matching.
    fn matches_patterns(&self, path: &Path, root: &Path) -> bool {
        let path = path.strip_prefix(root).unwrap_or(path);
        let Some(path_str) = path.to_str() else {
            return false;
        };

        // No include patterns means everything is included
        let matches_include = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                p.matches(path_str)
                    || path
                        .file_name()
                        .and_then(|f| f.to_str())
                        .is_some_and(|f| p.matches(f))
            });

        matches_include
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}
