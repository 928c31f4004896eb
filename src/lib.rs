//! chunkdex - n-gram indexing and search for document folders
//!
//! Splits documents into fixed character windows, stores the chunks
//! with their lexical features in size-capped JSON files and builds an
//! n-gram inverted index over them. Queries are answered by n-gram
//! overlap between the query and each candidate chunk.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - analysis (tokenizer, n-grams, stemmer, lemmatizer)
//!   - indexer (extraction, chunking, walking, pipeline)
//!   - storage (chunk store, inverted index, manifests, verification)
//!   - search (query engine, export)
//!   - services (unified service container)
//!
//! - **cli**: Command line front end (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character windows, byte ceiling on char boundaries)
//! - Snowball stemming and noun lemmatization per word
//! - Crash-safe storage (temp file + rename, manifests written last)
//! - Deterministic ranking (stable sort, first-seen tie order)

pub mod cli;
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{ChunkdexError, Result};
pub use crate::core::services::Services;
pub use crate::core::types::*;
