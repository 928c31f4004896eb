//! Configuration management for chunkdex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{ChunkdexError, Result};
use crate::core::indexer::chunker::{
    ChunkLimits, DEFAULT_MAX_CHUNK_BYTES, DEFAULT_MAX_NGRAM, DEFAULT_WINDOW_CHARS,
};
use crate::core::storage::DEFAULT_MAX_STORAGE_FILE_BYTES;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Longest n-gram size accepted by validation
const MAX_NGRAM_LIMIT: usize = 10;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_window_chars")]
    pub window_chars: usize,

    /// Maximum UTF-8 size of one chunk's content
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,

    /// Longest n-gram, in words
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,

    /// Word list restricting lemmatizer output to known base forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma_lexicon: Option<PathBuf>,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory created inside the indexed folder
    #[serde(default = "default_processed_dir_name")]
    pub processed_dir_name: String,

    /// Byte ceiling of one storage file
    #[serde(default = "default_max_storage_file_bytes")]
    pub max_storage_file_bytes: usize,

    /// Name of the inverted index file inside the processed directory
    #[serde(default = "default_index_file_name")]
    pub index_file_name: String,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// File patterns to include (glob syntax, empty = everything)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Drop hits scoring below this fraction (unset = no filter)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_relevance: Option<f64>,
}

/// External text extraction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Run external programs for PDF and office formats
    #[serde(default = "default_external_tools")]
    pub external_tools: bool,

    /// pandoc executable
    #[serde(default = "default_pandoc")]
    pub pandoc: String,

    /// pdftotext executable
    #[serde(default = "default_pdftotext")]
    pub pdftotext: String,
}

// Default value functions
fn default_window_chars() -> usize {
    DEFAULT_WINDOW_CHARS
}

fn default_max_chunk_bytes() -> usize {
    DEFAULT_MAX_CHUNK_BYTES
}

fn default_max_ngram() -> usize {
    DEFAULT_MAX_NGRAM
}

fn default_processed_dir_name() -> String {
    "processed_files".to_string()
}

fn default_max_storage_file_bytes() -> usize {
    DEFAULT_MAX_STORAGE_FILE_BYTES
}

fn default_index_file_name() -> String {
    "inverted_index.json".to_string()
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/*.tmp".to_string(),
    ]
}

fn default_max_file_size() -> usize {
    100
}

fn default_k() -> usize {
    10
}

fn default_max_k() -> usize {
    100
}

fn default_max_query_length() -> usize {
    1000
}

fn default_external_tools() -> bool {
    true
}

fn default_pandoc() -> String {
    "pandoc".to_string()
}

fn default_pdftotext() -> String {
    "pdftotext".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_chars: default_window_chars(),
            max_chunk_bytes: default_max_chunk_bytes(),
            max_ngram: default_max_ngram(),
            lemma_lexicon: None,
        }
    }
}

impl ChunkingConfig {
    /// Limits handed to the chunker
    pub fn limits(&self) -> ChunkLimits {
        ChunkLimits {
            window_chars: self.window_chars,
            max_chunk_bytes: self.max_chunk_bytes,
            max_ngram: self.max_ngram,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            processed_dir_name: default_processed_dir_name(),
            max_storage_file_bytes: default_max_storage_file_bytes(),
            index_file_name: default_index_file_name(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
            max_query_length: default_max_query_length(),
            min_relevance: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            external_tools: default_external_tools(),
            pandoc: default_pandoc(),
            pdftotext: default_pdftotext(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ChunkdexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. CHUNKDEX_CONFIG env var
    /// 2. XDG config file (~/.config/chunkdex/config.toml)
    /// 3. ./chunkdex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("CHUNKDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("chunkdex.toml").exists() {
                Self::from_file("chunkdex.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Chunking configuration
        if let Some(window) = parse_env("CHUNKDEX_WINDOW_CHARS") {
            self.chunking.window_chars = window;
        }
        if let Some(max_bytes) = parse_env("CHUNKDEX_MAX_CHUNK_BYTES") {
            self.chunking.max_chunk_bytes = max_bytes;
        }
        if let Some(max_ngram) = parse_env("CHUNKDEX_MAX_NGRAM") {
            self.chunking.max_ngram = max_ngram;
        }
        if let Ok(lexicon) = env::var("CHUNKDEX_LEMMA_LEXICON") {
            self.chunking.lemma_lexicon = Some(PathBuf::from(lexicon));
        }

        // Storage configuration
        if let Ok(name) = env::var("CHUNKDEX_PROCESSED_DIR") {
            self.storage.processed_dir_name = name;
        }
        if let Some(max_bytes) = parse_env("CHUNKDEX_MAX_STORAGE_FILE_BYTES") {
            self.storage.max_storage_file_bytes = max_bytes;
        }

        // Indexing configuration
        if let Some(max_size) = parse_env("CHUNKDEX_MAX_FILE_SIZE_MB") {
            self.indexing.max_file_size_mb = max_size;
        }

        // Search configuration
        if let Some(k) = parse_env("CHUNKDEX_DEFAULT_K") {
            self.search.default_k = k;
        }
        if let Some(k) = parse_env("CHUNKDEX_MAX_K") {
            self.search.max_k = k;
        }
        if let Some(len) = parse_env("CHUNKDEX_MAX_QUERY_LENGTH") {
            self.search.max_query_length = len;
        }
        if let Some(min) = parse_env("CHUNKDEX_MIN_RELEVANCE") {
            self.search.min_relevance = Some(min);
        }

        // Extraction configuration
        if let Some(enabled) = parse_env("CHUNKDEX_EXTERNAL_TOOLS") {
            self.extraction.external_tools = enabled;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate chunking config
        if self.chunking.window_chars == 0 {
            return Err(ChunkdexError::ConfigError(
                "Chunk window must be non-zero".to_string(),
            ));
        }

        if self.chunking.max_chunk_bytes == 0 {
            return Err(ChunkdexError::ConfigError(
                "Chunk byte ceiling must be non-zero".to_string(),
            ));
        }

        if !(1..=MAX_NGRAM_LIMIT).contains(&self.chunking.max_ngram) {
            return Err(ChunkdexError::ConfigError(format!(
                "Max n-gram must be between 1 and {MAX_NGRAM_LIMIT}"
            )));
        }

        // Validate storage config
        if self.storage.max_storage_file_bytes == 0 {
            return Err(ChunkdexError::ConfigError(
                "Storage file ceiling must be non-zero".to_string(),
            ));
        }

        if !is_plain_file_name(&self.storage.processed_dir_name) {
            return Err(ChunkdexError::ConfigError(format!(
                "Processed directory name must be a single path component: '{}'",
                self.storage.processed_dir_name
            )));
        }

        if !is_plain_file_name(&self.storage.index_file_name) {
            return Err(ChunkdexError::ConfigError(format!(
                "Index file name must be a single path component: '{}'",
                self.storage.index_file_name
            )));
        }

        // Validate search config
        if self.search.default_k == 0 {
            return Err(ChunkdexError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(ChunkdexError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(ChunkdexError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if let Some(min) = self.search.min_relevance {
            if !(0.0..=1.0).contains(&min) {
                return Err(ChunkdexError::ConfigError(
                    "Min relevance must be between 0 and 1".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Chunk window: {} chars", self.chunking.window_chars);
        tracing::debug!("  Chunk ceiling: {} bytes", self.chunking.max_chunk_bytes);
        tracing::debug!("  Max n-gram: {}", self.chunking.max_ngram);
        if let Some(lexicon) = &self.chunking.lemma_lexicon {
            tracing::debug!("  Lemma lexicon: {:?}", lexicon);
        }
        tracing::debug!("  Processed dir: {}", self.storage.processed_dir_name);
        tracing::debug!(
            "  Storage file ceiling: {} bytes",
            self.storage.max_storage_file_bytes
        );
        tracing::debug!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::debug!(
            "  Include patterns: {} patterns",
            self.indexing.include_patterns.len()
        );
        tracing::debug!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::debug!("  Default k: {}", self.search.default_k);
        tracing::debug!("  Max k: {}", self.search.max_k);
        match self.search.min_relevance {
            Some(min) => tracing::debug!("  Min relevance: {}", min),
            None => tracing::debug!("  Min relevance: off"),
        }
        tracing::debug!("  External tools: {}", self.extraction.external_tools);
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", name, value);
            None
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
