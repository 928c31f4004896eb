// Chunking invariants over realistic text

use crate::common::{repeated_words, SCENARIO_TEXT};
use chunkdex::core::indexer::{ChunkLimits, Chunker};
use chunkdex::core::analysis::{IdentityStemmer, NounLemmatizer};
use std::sync::Arc;

fn chunker(window_chars: usize, max_chunk_bytes: usize) -> Chunker {
    Chunker::new(
        ChunkLimits {
            window_chars,
            max_chunk_bytes,
            max_ngram: 5,
        },
        Arc::new(IdentityStemmer),
        Arc::new(NounLemmatizer::new()),
    )
}

fn long_text() -> String {
    let paragraph = "Search engines split documents into chunks. \
                     Each chunk is indexed by the phrases it contains, \
                     and queries are matched against those phrases. ";
    paragraph.repeat(200)
}

#[test]
fn test_single_chunk_scenario() {
    let chunks = Chunker::with_defaults().chunk_text(SCENARIO_TEXT);

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_id, 0);
    assert_eq!(
        chunks[0].words,
        vec!["the", "quick", "brown", "fox", "jumps"]
    );
    for word in &chunks[0].words {
        assert!(chunks[0].contains_ngram(word), "missing 1-gram {word}");
    }
    assert!(chunks[0].contains_ngram("the quick brown fox jumps"));
    // 5 + 4 + 3 + 2 + 1
    assert_eq!(chunks[0].n_grams.len(), 15);
}

#[test]
fn test_chunking_is_idempotent() {
    let chunker = Chunker::with_defaults();
    let text = long_text();

    let first = serde_json::to_vec(&chunker.chunk_text(&text)).unwrap();
    let second = serde_json::to_vec(&chunker.chunk_text(&text)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_word_lists_stay_aligned() {
    let chunks = Chunker::with_defaults().chunk_text(&long_text());

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert_eq!(chunk.words.len(), chunk.stemmed_words.len());
        assert_eq!(chunk.words.len(), chunk.lemmatized_words.len());
    }
}

#[test]
fn test_window_boundaries_cover_text() {
    let text = long_text();
    let chunks = chunker(500, 15 * 1024).chunk_text(&text);

    let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(rebuilt, text);
    assert_eq!(chunks.len(), text.chars().count().div_ceil(500));
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_id, i);
    }
}

#[test]
fn test_byte_ceiling_backs_off_to_space() {
    let text = repeated_words("word", 100);
    let chunks = chunker(5000, 42).chunk_text(&text);

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.len() <= 42);
    assert!(!chunks[0].content.ends_with(' '));
    assert!(chunks[0].words.iter().all(|w| w == "word"));
}

#[test]
fn test_words_straddling_windows_are_split() {
    // A word cut by the window edge becomes two tokens
    let chunks = chunker(7, 1024).chunk_text("alpha bravo");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].words, vec!["alpha", "b"]);
    assert_eq!(chunks[1].words, vec!["ravo"]);
}

#[test]
fn test_empty_text_has_no_chunks() {
    assert!(Chunker::with_defaults().chunk_text("").is_empty());
}
