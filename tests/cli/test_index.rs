//! Tests for the index CLI command

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::TestFolder;
use chunkdex::cli::commands::index::{execute, IndexArgs};
use chunkdex::cli::OutputFormat;

fn args(folder: &TestFolder) -> IndexArgs {
    IndexArgs {
        path: folder.path().to_path_buf(),
        include: vec![],
        exclude: vec![],
        quiet: true,
    }
}

#[test]
fn test_index_human() {
    let services = create_cli_test_services();
    let folder = TestFolder::small();

    let result = execute(args(&folder), &services, OutputFormat::Human);

    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
    assert!(folder.processed_dir().join("inverted_index.json").exists());
}

#[test]
fn test_index_json_twice() {
    let services = create_cli_test_services();
    let folder = TestFolder::small();

    assert!(execute(args(&folder), &services, OutputFormat::Json).is_ok());
    assert!(execute(args(&folder), &services, OutputFormat::Json).is_ok());
}

#[test]
fn test_index_with_patterns() {
    let services = create_cli_test_services();
    let folder = TestFolder::small();

    let result = execute(
        IndexArgs {
            path: folder.path().to_path_buf(),
            include: vec!["*.md".to_string()],
            exclude: vec!["**/notes/**".to_string()],
            quiet: true,
        },
        &services,
        OutputFormat::Human,
    );

    assert!(result.is_ok());
    let manifests = services
        .open_folder(folder.path())
        .unwrap()
        .store()
        .list_manifests()
        .unwrap();
    assert_eq!(manifests.len(), 1);
    assert_eq!(manifests[0].document_id, "README.md");
}

#[test]
fn test_index_nonexistent_path() {
    let services = create_cli_test_services();

    let result = execute(
        IndexArgs {
            path: "/nonexistent/chunkdex/docs".into(),
            include: vec![],
            exclude: vec![],
            quiet: true,
        },
        &services,
        OutputFormat::Human,
    );

    let err = result.unwrap_err().to_string();
    assert!(err.contains("Invalid path"), "unexpected error: {err}");
}

#[test]
fn test_index_file_instead_of_folder() {
    let services = create_cli_test_services();
    let folder = TestFolder::with_files(&[("doc.txt", "words")]);

    let result = execute(
        IndexArgs {
            path: folder.files[0].clone(),
            include: vec![],
            exclude: vec![],
            quiet: true,
        },
        &services,
        OutputFormat::Human,
    );

    let err = result.unwrap_err().to_string();
    assert!(err.contains("not a directory"), "unexpected error: {err}");
}
