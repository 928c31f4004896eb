// Test helper functions

use chunkdex::core::config::{Config, StorageConfig};
use chunkdex::core::services::Services;
use chunkdex::core::storage::StorageManager;
use chunkdex::core::types::{IndexStats, SearchRequest, SearchResponse};
use std::path::Path;

/// Create services from the default configuration
///
/// External extraction tools are disabled so results do not depend on
/// what is installed on the test machine.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> Services {
    let mut config = Config::default();
    config.extraction.external_tools = false;
    Services::new(config)
}

/// Storage configuration with a tiny storage file ceiling
#[allow(dead_code)] // Used in integration tests
pub fn small_storage_config(max_storage_file_bytes: usize) -> Config {
    let mut config = Config::default();
    config.extraction.external_tools = false;
    config.storage = StorageConfig {
        max_storage_file_bytes,
        ..StorageConfig::default()
    };
    config
}

/// Assert that index stats are valid
#[allow(dead_code)] // Used in integration tests
pub fn assert_valid_stats(stats: &IndexStats) {
    assert!(
        stats.documents_indexed > 0,
        "Expected documents_indexed > 0, got {}",
        stats.documents_indexed
    );
    assert!(
        stats.chunks_created >= stats.documents_indexed,
        "Expected chunks_created ({}) >= documents_indexed ({})",
        stats.chunks_created,
        stats.documents_indexed
    );
    assert!(
        stats.storage_files_written > 0,
        "Expected storage_files_written > 0, got {}",
        stats.storage_files_written
    );
    assert!(
        stats.index_keys > 0,
        "Expected index_keys > 0, got {}",
        stats.index_keys
    );
}

/// Index a folder and return the run statistics
#[allow(dead_code)] // Used in integration tests
pub fn index_folder(services: &Services, folder: &Path) -> IndexStats {
    services
        .index_folder(folder)
        .expect("Failed to index folder")
}

/// Open the processed directory of an indexed folder
#[allow(dead_code)] // Used in integration tests
pub fn open_folder(services: &Services, folder: &Path) -> StorageManager {
    services
        .open_folder(folder)
        .expect("Failed to open processed directory")
}

/// Search an indexed folder
#[allow(dead_code)] // Used in integration tests
pub fn search_folder(
    services: &Services,
    folder: &Path,
    query: &str,
    k: Option<usize>,
) -> SearchResponse {
    services
        .search
        .search_folder(
            folder,
            &SearchRequest {
                query: query.to_string(),
                k,
                min_relevance: None,
            },
        )
        .expect("Search failed")
}
