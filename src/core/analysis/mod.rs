//! Lexical analysis shared by indexing and querying.
//!
//! The chunker and the query engine must derive words and n-grams
//! with exactly the same rules, otherwise an n-gram indexed for a
//! chunk could never be produced by a query. Both go through
//! [`tokenize`] and [`generate_ngrams`].
//!
//! Word normalization (stemming and lemmatization) sits behind the
//! [`Stemmer`] and [`Lemmatizer`] traits so that callers inject the
//! implementation they want.

pub mod lemma;
pub mod stem;

pub use lemma::{Lemmatizer, NounLemmatizer};
pub use stem::{IdentityStemmer, SnowballStemmer, Stemmer};

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal runs of Unicode word characters (letters, digits, `_`)
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\b").expect("word pattern is a valid regex"));

/// Split text into lowercase word tokens.
///
/// The text is lowercased first and then scanned for `\b\w+\b`
/// matches, so tokens are always substrings of the lowercased text.
///
/// # Example
///
/// ```
/// use chunkdex::core::analysis::tokenize;
///
/// assert_eq!(tokenize("The Quick, brown_fox!"), vec!["the", "quick", "brown_fox"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Generate every contiguous n-gram of 1..=`max_n` words.
///
/// Output order is all 1-grams in position order, then all 2-grams,
/// and so on. Sizes larger than the number of words produce nothing.
pub fn generate_ngrams(words: &[String], max_n: usize) -> Vec<String> {
    let mut n_grams = Vec::new();

    for n in 1..=max_n.min(words.len()) {
        n_grams.extend(words.windows(n).map(|window| window.join(" ")));
    }

    n_grams
}
