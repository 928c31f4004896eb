// Storage files stay under their byte ceiling

use crate::common::{index_folder, open_folder, repeated_words, small_storage_config, TestFolder};
use chunkdex::core::services::Services;
use chunkdex::core::types::Chunk;
use std::fs;

const CEILING: usize = 4096;

fn services_with_window(window_chars: usize) -> Services {
    let mut config = small_storage_config(CEILING);
    config.chunking.window_chars = window_chars;
    config.chunking.max_ngram = 2;
    Services::new(config)
}

fn assert_file_well_formed(bytes: &[u8]) -> Vec<Chunk> {
    assert!(
        bytes.len() <= CEILING,
        "storage file of {} bytes exceeds {}",
        bytes.len(),
        CEILING
    );
    let chunks: Vec<Chunk> = serde_json::from_slice(bytes).unwrap();
    for (position, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_id, position);
    }
    chunks
}

#[test]
fn test_two_documents_get_separate_storage_files() {
    let folder = TestFolder::with_files(&[
        ("a.txt", repeated_words("apple", 60).as_str()),
        ("b.txt", repeated_words("banana", 60).as_str()),
    ]);
    let services = services_with_window(120);

    let stats = index_folder(&services, folder.path());
    let manager = open_folder(&services, folder.path());
    let files = manager.store().list_storage_files().unwrap();

    assert_eq!(stats.documents_indexed, 2);
    assert!(files.len() >= 2);
    assert!(files.iter().any(|f| f.to_str() == Some("a.txt.0000.chunks.json")));
    assert!(files.iter().any(|f| f.to_str() == Some("b.txt.0000.chunks.json")));

    for name in &files {
        let bytes = fs::read(manager.processed_dir().join(name)).unwrap();
        let chunks = assert_file_well_formed(&bytes);
        assert_eq!(chunks[0].chunk_id, 0);
    }
}

#[test]
fn test_large_document_splits_into_parts() {
    let text = "Rivers carry sediment from the mountains down to the sea, \
                building deltas where the current slows. "
        .repeat(40);
    let folder = TestFolder::with_files(&[("rivers.txt", text.as_str())]);
    let services = services_with_window(200);

    let stats = index_folder(&services, folder.path());
    let manager = open_folder(&services, folder.path());
    let files = manager.store().list_storage_files().unwrap();

    assert!(files.len() > 1, "expected several parts, got {files:?}");
    assert_eq!(stats.storage_files_written, files.len());
    assert_eq!(files[0].to_str(), Some("rivers.txt.0000.chunks.json"));
    assert_eq!(files[1].to_str(), Some("rivers.txt.0001.chunks.json"));

    let mut total = 0;
    for name in &files {
        let bytes = fs::read(manager.processed_dir().join(name)).unwrap();
        total += assert_file_well_formed(&bytes).len();
    }
    assert_eq!(total, stats.chunks_created);

    // Chunks come back in document order across parts
    let rebuilt: String = files
        .iter()
        .flat_map(|name| manager.store().load_file(name).unwrap())
        .map(|chunk| chunk.content)
        .collect();
    assert_eq!(rebuilt, text);
}
