//! Search over the n-gram index.
//!
//! Queries are expanded into n-grams, candidate chunks are collected
//! from the posting lists, and each candidate is scored by the
//! fraction of query n-grams its content contains.

mod engine;
mod export;
mod query;
mod service;

pub use engine::{collect_candidates, QueryEngine};
pub use export::export_hits;
pub use query::{prepare_query, relevance, PreparedQuery};
pub use service::SearchService;
