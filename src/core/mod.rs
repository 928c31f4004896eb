//! Core domain logic
//!
//! Everything except the command line front end lives here.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **analysis**: Tokenizing, n-grams, stemming, lemmatization
//! - **indexer**: Extraction, chunking, file walking, pipeline
//! - **storage**: Chunk storage files and the inverted index
//! - **search**: N-gram overlap queries
//! - **services**: Unified service container

pub mod analysis;
pub mod config;
pub mod error;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ChunkdexError, Result};
pub use services::Services;
