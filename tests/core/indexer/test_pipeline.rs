// Folder processing: reruns, skips and the processed directory

use crate::common::{assert_valid_stats, create_test_services, index_folder, open_folder, TestFolder};
use chunkdex::core::config::Config;
use chunkdex::core::error::ChunkdexError;
use chunkdex::core::services::Services;
use std::fs;

#[test]
fn test_index_small_folder() {
    let folder = TestFolder::small();
    let services = create_test_services();

    let stats = index_folder(&services, folder.path());

    assert_valid_stats(&stats);
    assert_eq!(stats.files_seen, 6);
    assert_eq!(stats.documents_indexed, 5);
    assert_eq!(stats.files_unsupported, 1); // image.png
    assert_eq!(stats.files_failed, 0);
    assert!(folder.processed_dir().join("inverted_index.json").exists());
}

#[test]
fn test_rerun_skips_processed_documents() {
    let folder = TestFolder::small();
    let services = create_test_services();

    let first = index_folder(&services, folder.path());
    let index_before = fs::read(folder.processed_dir().join("inverted_index.json")).unwrap();

    let second = index_folder(&services, folder.path());
    let index_after = fs::read(folder.processed_dir().join("inverted_index.json")).unwrap();

    assert_eq!(second.documents_indexed, 0);
    assert_eq!(second.documents_already_processed, first.documents_indexed);
    assert_eq!(second.chunks_created, 0);
    assert_eq!(second.index_keys, first.index_keys);
    assert_eq!(index_before, index_after);
}

#[test]
fn test_rerun_indexes_only_new_documents() {
    let mut folder = TestFolder::with_files(&[("first.txt", "alpha bravo charlie")]);
    let services = create_test_services();

    let first = index_folder(&services, folder.path());
    folder.add_file("second.txt", "delta echo foxtrot");
    let second = index_folder(&services, folder.path());

    assert_eq!(first.documents_indexed, 1);
    assert_eq!(second.documents_indexed, 1);
    assert_eq!(second.documents_already_processed, 1);

    let index = open_folder(&services, folder.path()).load_index().unwrap();
    assert_eq!(index.lookup("alpha").len(), 1);
    assert_eq!(index.lookup("delta echo foxtrot").len(), 1);
}

#[test]
fn test_processed_directory_is_not_indexed() {
    let folder = TestFolder::with_files(&[("doc.txt", "one two three")]);
    let services = create_test_services();

    let first = index_folder(&services, folder.path());
    let second = index_folder(&services, folder.path());

    // Storage files and manifests are never walked as documents
    assert_eq!(first.files_seen, 1);
    assert_eq!(second.files_seen, 1);
}

#[test]
fn test_hidden_and_excluded_directories_skipped() {
    let folder = TestFolder::with_files(&[
        ("visible.txt", "kept document"),
        (".hidden/secret.txt", "hidden document"),
        (".git/description", "repository metadata"),
        ("leftover.txt.tmp", "partial download"),
    ]);
    let services = create_test_services();

    let stats = index_folder(&services, folder.path());

    assert_eq!(stats.files_seen, 1);
    assert_eq!(stats.documents_indexed, 1);
}

#[test]
fn test_folder_below_target_directory_is_indexed() {
    let folder = TestFolder::with_files(&[("target/papers/doc.txt", "nested corpus document")]);
    let root = folder.path().join("target/papers");
    let services = create_test_services();

    let stats = index_folder(&services, &root);

    assert_eq!(stats.files_seen, 1);
    assert_eq!(stats.documents_indexed, 1);
}

#[test]
fn test_subfolders_named_like_build_dirs_are_indexed() {
    let folder = TestFolder::with_files(&[
        ("target/goals.txt", "quarterly goals"),
        ("node_modules/notes.md", "notes kept in an oddly named folder"),
    ]);
    let services = create_test_services();

    let stats = index_folder(&services, folder.path());

    assert_eq!(stats.files_seen, 2);
    assert_eq!(stats.documents_indexed, 2);
}

#[test]
fn test_include_patterns_restrict_walk() {
    let folder = TestFolder::with_files(&[
        ("notes/a.md", "markdown note"),
        ("notes/b.txt", "text note"),
    ]);
    let mut config = Config::default();
    config.extraction.external_tools = false;
    config.indexing.include_patterns = vec!["*.md".to_string()];
    let services = Services::new(config);

    let stats = index_folder(&services, folder.path());

    assert_eq!(stats.files_seen, 1);
    assert_eq!(stats.documents_indexed, 1);
}

#[test]
fn test_manifest_records_document() {
    let folder = TestFolder::with_files(&[("papers/intro.txt", "an introduction")]);
    let services = create_test_services();

    index_folder(&services, folder.path());

    let manager = open_folder(&services, folder.path());
    let manifests = manager.store().list_manifests().unwrap();
    assert_eq!(manifests.len(), 1);
    assert_eq!(manifests[0].document_id, "papers__intro.txt");
    assert_eq!(manifests[0].chunk_count, 1);
    assert_eq!(
        manifests[0].storage_files[0].to_str(),
        Some("papers__intro.txt.0000.chunks.json")
    );
}

#[test]
fn test_index_missing_folder_fails() {
    let services = create_test_services();
    let err = services
        .index_folder(std::path::Path::new("/nonexistent/chunkdex/folder"))
        .unwrap_err();

    assert!(matches!(err, ChunkdexError::InvalidPath(_)));
}
