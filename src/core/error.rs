//! Error types and error handling for chunkdex.
//!
//! This module defines the error types used throughout the
//! crate. Adapters (the CLI) turn these into user-facing messages.

use thiserror::Error;

/// Result type alias for chunkdex operations
pub type Result<T> = std::result::Result<T, ChunkdexError>;

/// Main error type for chunkdex
#[derive(Error, Debug)]
pub enum ChunkdexError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt data: {0}")]
    Corrupt(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ChunkdexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ChunkdexError::NotFound(_) | ChunkdexError::InvalidPath(_)
        )
    }

    /// Check if the underlying data exists but cannot be decoded
    pub fn is_corrupt(&self) -> bool {
        matches!(self, ChunkdexError::Corrupt(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ChunkdexError::InvalidQuery(_) | ChunkdexError::ConfigError(_)
        )
    }
}
