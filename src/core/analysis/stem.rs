//! Suffix-stripping word normalization.

use std::sync::{Mutex, PoisonError};

use tantivy::tokenizer::{
    Language, RawTokenizer, Stemmer as SnowballFilter, TextAnalyzer, TokenStream,
};

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// English Snowball (Porter2) stemmer.
///
/// Runs each word through a tantivy analyzer made of a raw tokenizer
/// (the whole input is one token) followed by the Snowball stemming
/// filter.
pub struct SnowballStemmer {
    analyzer: Mutex<TextAnalyzer>,
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &"english")
            .finish()
    }
}

impl SnowballStemmer {
    /// Create an English stemmer
    pub fn english() -> Self {
        let analyzer = TextAnalyzer::builder(RawTokenizer::default())
            .filter(SnowballFilter::new(Language::English))
            .build();

        Self {
            analyzer: Mutex::new(analyzer),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let mut analyzer = self
            .analyzer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut stream = analyzer.token_stream(word);
        let mut stemmed = String::new();
        while stream.advance() {
            stemmed.push_str(&stream.token().text);
        }

        if stemmed.is_empty() {
            word.to_string()
        } else {
            stemmed
        }
    }

    fn name(&self) -> &'static str {
        "snowball-english"
    }
}

/// Stemmer that returns words unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
