// Every posting points at a chunk that contains its n-gram

use crate::common::{create_test_services, index_folder, open_folder, TestFolder};
use std::fs;

#[test]
fn test_every_posting_resolves() {
    let folder = TestFolder::small();
    let services = create_test_services();
    index_folder(&services, folder.path());

    let manager = open_folder(&services, folder.path());
    let index = manager.load_index().unwrap();

    assert!(!index.is_empty());
    for (n_gram, postings) in index.iter() {
        for address in postings {
            let chunk = manager.store().load(address).unwrap();
            assert!(
                chunk.contains_ngram(n_gram),
                "{address} does not contain '{n_gram}'"
            );
        }
    }
}

#[test]
fn test_verify_consistent_folder() {
    let folder = TestFolder::small();
    let services = create_test_services();
    index_folder(&services, folder.path());

    let report = services.verify_folder(folder.path()).unwrap();
    let index = open_folder(&services, folder.path()).load_index().unwrap();

    assert!(report.is_consistent);
    assert_eq!(report.keys_checked, index.len());
    assert_eq!(report.postings_checked, index.posting_count());
    assert_eq!(report.manifests_checked, 5);
    assert!(report.problems.is_empty());
}

#[test]
fn test_verify_detects_missing_storage_file() {
    let folder = TestFolder::with_files(&[
        ("keep.txt", "kept words here"),
        ("lose.txt", "lost words there"),
    ]);
    let services = create_test_services();
    index_folder(&services, folder.path());

    fs::remove_file(folder.processed_dir().join("lose.txt.0000.chunks.json")).unwrap();

    let report = services.verify_folder(folder.path()).unwrap();

    assert!(!report.is_consistent);
    assert!(report.missing_chunks > 0);
    assert_eq!(report.missing_storage_files, 1);
    assert!(!report.problems.is_empty());
}

#[test]
fn test_verify_unindexed_folder_fails() {
    let folder = TestFolder::with_files(&[("doc.txt", "never indexed")]);
    let services = create_test_services();

    let err = services.verify_folder(folder.path()).unwrap_err();
    assert!(err.is_not_found());
}
