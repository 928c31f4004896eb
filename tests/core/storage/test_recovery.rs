// Interrupted runs leave no half-written state behind

use crate::common::{create_test_services, index_folder, open_folder, TestFolder};
use std::fs;

#[test]
fn test_leftover_temp_files_are_discarded() {
    let folder = TestFolder::with_files(&[("doc.txt", "some words")]);
    let services = create_test_services();
    index_folder(&services, folder.path());

    let leftover = folder.processed_dir().join("half.txt.0000.chunks.json.tmp");
    fs::write(&leftover, b"[{\"chunk_id\":0,").unwrap();

    index_folder(&services, folder.path());

    assert!(!leftover.exists());
}

#[test]
fn test_missing_manifest_reprocesses_document() {
    let folder = TestFolder::with_files(&[("doc.txt", "repeatable words")]);
    let services = create_test_services();
    index_folder(&services, folder.path());

    // A crash after the index save but before the manifest write
    fs::remove_file(folder.processed_dir().join("doc.txt.manifest.json")).unwrap();

    let stats = index_folder(&services, folder.path());
    assert_eq!(stats.documents_indexed, 1);

    // The storage file name is deterministic, so the rerun overwrites it
    let manager = open_folder(&services, folder.path());
    assert_eq!(manager.store().list_storage_files().unwrap().len(), 1);
    assert!(services.verify_folder(folder.path()).unwrap().is_consistent);
}
