//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<Services> wrappers matching CLI execute() signatures
//! - Indexed folder setup for search/chunk/stats tests

use crate::common::TestFolder;
use chunkdex::core::config::Config;
use chunkdex::core::services::Services;
use std::sync::Arc;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_services() -> Arc<Services> {
    let mut config = Config::default();
    config.extraction.external_tools = false;
    Arc::new(Services::new(config))
}

/// Create a folder with the given files and index it
pub fn setup_indexed_folder(services: &Arc<Services>, files: &[(&str, &str)]) -> TestFolder {
    let folder = TestFolder::with_files(files);
    services
        .index_folder(folder.path())
        .expect("Failed to index folder");
    folder
}

/// Standard documents for search tests
pub fn search_test_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "astronomy.txt",
            "The telescope revealed a distant spiral galaxy.",
        ),
        (
            "biology.md",
            "# Cells\n\nThe cell membrane controls what enters the cell.",
        ),
        (
            "geology.txt",
            "Granite forms when magma cools slowly underground.",
        ),
    ]
}
