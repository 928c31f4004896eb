//! Tests for the stats CLI command

use crate::cli::test_helpers::{create_cli_test_services, search_test_files, setup_indexed_folder};
use crate::common::TestFolder;
use chunkdex::cli::commands::stats::{execute, StatsArgs};
use chunkdex::cli::OutputFormat;

#[test]
fn test_stats_human_and_json() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(
            StatsArgs {
                folder: folder.path().to_path_buf(),
            },
            &services,
            format,
        );
        assert!(result.is_ok(), "stats should succeed: {:?}", result.err());
    }

    let stats = services.open_folder(folder.path()).unwrap().stats().unwrap();
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.chunks, 3);
    assert_eq!(stats.storage_files, 3);
    assert!(stats.index_keys > 0);
    assert!(stats.index_postings >= stats.index_keys);
}

#[test]
fn test_stats_unindexed_folder() {
    let services = create_cli_test_services();
    let folder = TestFolder::with_files(&[("doc.txt", "never indexed")]);

    let result = execute(
        StatsArgs {
            folder: folder.path().to_path_buf(),
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_err());
}
