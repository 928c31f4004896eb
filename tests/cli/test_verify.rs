//! Tests for the verify CLI command

use crate::cli::test_helpers::{create_cli_test_services, search_test_files, setup_indexed_folder};
use chunkdex::cli::commands::verify::{execute, VerifyArgs};
use chunkdex::cli::OutputFormat;

#[test]
fn test_verify_consistent() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    let result = execute(
        VerifyArgs {
            folder: folder.path().to_path_buf(),
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_ok(), "verify should succeed: {:?}", result.err());
}

#[test]
fn test_verify_inconsistent_fails() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());
    std::fs::remove_file(folder.processed_dir().join("geology.txt.0000.chunks.json")).unwrap();

    let result = execute(
        VerifyArgs {
            folder: folder.path().to_path_buf(),
        },
        &services,
        OutputFormat::Json,
    );

    let err = result.unwrap_err().to_string();
    assert!(err.contains("inconsistent"), "unexpected error: {err}");
}
