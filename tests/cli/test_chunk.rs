//! Tests for the get-chunk CLI command

use crate::cli::test_helpers::{create_cli_test_services, search_test_files, setup_indexed_folder};
use chunkdex::cli::commands::chunk::{execute, ChunkArgs};
use chunkdex::cli::OutputFormat;

#[test]
fn test_get_chunk_human_verbose() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    let result = execute(
        ChunkArgs {
            storage_file: "astronomy.txt.0000.chunks.json".into(),
            chunk_id: 0,
            folder: folder.path().to_path_buf(),
            verbose: true,
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_ok(), "get-chunk should succeed: {:?}", result.err());
}

#[test]
fn test_get_chunk_json() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    let result = execute(
        ChunkArgs {
            storage_file: "biology.md.0000.chunks.json".into(),
            chunk_id: 0,
            folder: folder.path().to_path_buf(),
            verbose: false,
        },
        &services,
        OutputFormat::Json,
    );

    assert!(result.is_ok());
}

#[test]
fn test_get_chunk_out_of_range() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    let result = execute(
        ChunkArgs {
            storage_file: "astronomy.txt.0000.chunks.json".into(),
            chunk_id: 42,
            folder: folder.path().to_path_buf(),
            verbose: false,
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_err());
}

#[test]
fn test_get_chunk_unknown_storage_file() {
    let services = create_cli_test_services();
    let folder = setup_indexed_folder(&services, &search_test_files());

    let result = execute(
        ChunkArgs {
            storage_file: "missing.txt.0000.chunks.json".into(),
            chunk_id: 0,
            folder: folder.path().to_path_buf(),
            verbose: false,
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_err());
}
