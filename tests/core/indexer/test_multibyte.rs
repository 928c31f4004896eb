// UTF-8 safety: multibyte text through chunking and indexing

use crate::common::{create_test_services, index_folder, TestFolder};
use chunkdex::core::analysis::{IdentityStemmer, NounLemmatizer};
use chunkdex::core::indexer::{ChunkLimits, Chunker};
use std::sync::Arc;

fn chunker(window_chars: usize, max_chunk_bytes: usize) -> Chunker {
    Chunker::new(
        ChunkLimits {
            window_chars,
            max_chunk_bytes,
            max_ngram: 3,
        },
        Arc::new(IdentityStemmer),
        Arc::new(NounLemmatizer::new()),
    )
}

#[test]
fn test_emoji_windows_count_characters() {
    let text = "🦀".repeat(25);
    let chunks = chunker(10, 1024).chunk_text(&text);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].content.chars().count(), 10);
    assert_eq!(chunks[2].content.chars().count(), 5);
    // Emoji are not word characters
    assert!(chunks.iter().all(|c| c.words.is_empty()));
}

#[test]
fn test_ceiling_never_splits_a_character() {
    // 4-byte characters with no spaces: the cut lands on a boundary
    let text = "😀".repeat(5000);
    let chunks = chunker(5000, 15 * 1024).chunk_text(&text);

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.len() <= 15 * 1024);
    assert_eq!(chunks[0].content.len() % 4, 0);
}

#[test]
fn test_cjk_words_are_tokens() {
    let chunks = chunker(100, 1024).chunk_text("中文 测试 文本");

    assert_eq!(chunks[0].words, vec!["中文", "测试", "文本"]);
    assert!(chunks[0].contains_ngram("中文 测试"));
}

#[test]
fn test_index_mixed_scripts() {
    let folder = TestFolder::with_files(&[
        ("greek.txt", "Γειά σου κόσμε"),
        ("russian.txt", "Привет мир"),
        ("mixed.md", "# Café 🚀\n\nnaïve résumé"),
    ]);

    let services = create_test_services();
    let stats = index_folder(&services, folder.path());

    assert_eq!(stats.documents_indexed, 3);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.chunks_created, 3);
}
