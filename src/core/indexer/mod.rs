//! Document indexing module.
//!
//! Turns a folder of documents into stored chunks and an n-gram
//! index. Key pieces:
//!
//! - Text extraction per file format
//! - UTF-8 safe character-window chunking with lexical features
//! - File system walking with pattern matching
//! - Indexing pipeline orchestration
//!
//! # Safety
//!
//! The chunker slices on offsets from `char_indices()` and caps
//! chunks at a byte ceiling on a character boundary, so multi-byte
//! text never causes a panic.

pub mod chunker;
pub mod extractor;
pub mod pipeline;
pub mod walker;

pub use chunker::{ChunkLimits, Chunker};
pub use extractor::{
    CommandExtractor, Extraction, FormatRouter, PlainTextExtractor, SkipReason, TextExtractor,
};
pub use pipeline::IndexingPipeline;
pub use walker::FileWalker;
