//! Dictionary-based base-form normalization.
//!
//! [`NounLemmatizer`] follows the WordNet "morphy" procedure for
//! nouns: irregular forms are looked up in an exception table, then
//! regular plural suffixes are detached. When a lexicon (word list)
//! is loaded, a detached candidate is accepted only if the lexicon
//! knows it; without one, conservative suffix guards decide.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::core::error::{ChunkdexError, Result};

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Map a word to its dictionary base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Irregular plural → singular
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("hypotheses", "hypothesis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("bacteria", "bacterium"),
    ("curricula", "curriculum"),
    ("media", "medium"),
    ("stimuli", "stimulus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("fungi", "fungus"),
    ("alumni", "alumnus"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
];

/// Words ending in `s` that are already base forms
const INVARIANT_NOUNS: &[&str] = &[
    "news",
    "series",
    "species",
    "means",
    "physics",
    "mathematics",
    "economics",
    "politics",
    "ethics",
    "statistics",
    "linguistics",
    "lens",
    "gas",
    "was",
    "has",
    "does",
    "its",
    "yes",
    "always",
    "perhaps",
    "whereas",
];

/// Regular noun suffix rules, longest suffix first: (suffix, replacement)
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ies", "y"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "se"),
    ("s", ""),
];

/// WordNet-style noun lemmatizer.
#[derive(Debug, Clone)]
pub struct NounLemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
    invariants: HashSet<&'static str>,
    lexicon: Option<HashSet<String>>,
}

impl NounLemmatizer {
    /// Create a lemmatizer with the built-in exception table only
    pub fn new() -> Self {
        Self {
            exceptions: IRREGULAR_NOUNS.iter().copied().collect(),
            invariants: INVARIANT_NOUNS.iter().copied().collect(),
            lexicon: None,
        }
    }

    /// Create a lemmatizer that validates candidates against a lexicon
    pub fn with_lexicon<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lexicon = words
            .into_iter()
            .map(|w| w.into().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            lexicon: Some(lexicon),
            ..Self::new()
        }
    }

    /// Load a lexicon from a word list (one word per line, `#` comments)
    pub fn from_word_list(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ChunkdexError::ConfigError(format!("Failed to read lexicon {path:?}: {e}"))
        })?;

        let words = contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(str::to_string);

        Ok(Self::with_lexicon(words))
    }

    /// Number of words in the lexicon (0 when none is loaded)
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.as_ref().map_or(0, HashSet::len)
    }

    fn known(&self, candidate: &str) -> bool {
        self.lexicon
            .as_ref()
            .is_some_and(|lexicon| lexicon.contains(candidate))
    }

    fn lemmatize_with_lexicon(&self, word: &str) -> Option<String> {
        if self.known(word) {
            return Some(word.to_string());
        }

        NOUN_SUFFIX_RULES
            .iter()
            .chain(&[("es", ""), ("ses", "s"), ("men", "man")])
            .filter_map(|(suffix, replacement)| {
                word.strip_suffix(suffix)
                    .map(|stem| format!("{stem}{replacement}"))
            })
            .find(|candidate| !candidate.is_empty() && self.known(candidate))
    }

    fn lemmatize_heuristic(&self, word: &str) -> String {
        if word.chars().count() <= 3
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
            || word.chars().any(|c| c.is_numeric())
        {
            return word.to_string();
        }

        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                // "ies" on a short word ("ties") is a plain "s" plural
                if *suffix == "ies" && stem.chars().count() < 2 {
                    return format!("{stem}ie");
                }
                return format!("{stem}{replacement}");
            }
        }

        word.to_string()
    }
}

impl Default for NounLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.exceptions.get(word) {
            return (*base).to_string();
        }
        if self.invariants.contains(word) {
            return word.to_string();
        }

        if self.lexicon.is_some() {
            return self
                .lemmatize_with_lexicon(word)
                .unwrap_or_else(|| word.to_string());
        }

        self.lemmatize_heuristic(word)
    }

    fn name(&self) -> &'static str {
        "wordnet-noun"
    }
}
