// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{repeated_words, TestFolder, SCENARIO_TEXT};
#[allow(unused_imports)]
pub use helpers::{
    assert_valid_stats, create_test_services, index_folder, open_folder, search_folder,
    small_storage_config,
};
