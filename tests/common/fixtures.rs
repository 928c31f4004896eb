// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The five-word sentence used by the single-chunk scenarios
#[allow(dead_code)] // Used in integration tests
pub const SCENARIO_TEXT: &str = "the quick brown fox jumps";

/// Document folder fixture backed by a temporary directory
#[allow(dead_code)] // Used in integration tests
pub struct TestFolder {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestFolder {
    /// A small folder of plain text and markdown notes
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        Self::with_files(&[
            ("fox.txt", SCENARIO_TEXT),
            (
                "notes/gardening.md",
                "# Gardening\n\nWater the tomato plants every morning.",
            ),
            (
                "notes/cooking.txt",
                "Simmer the tomato sauce for an hour before serving.",
            ),
            (
                "papers/search.txt",
                "An inverted index maps each term to the documents containing it.",
            ),
            ("README.md", "# Library\n\nA folder of **assorted** notes."),
            ("image.png", "not really an image"),
        ])
    }

    /// Create with custom files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    /// Add one more file after creation
    #[allow(dead_code)] // Used in integration tests
    pub fn add_file(&mut self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        std::fs::write(&full_path, content).unwrap();
        self.files.push(full_path);
    }

    /// Get path to the folder
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default processed directory of the folder
    #[allow(dead_code)] // Used in integration tests
    pub fn processed_dir(&self) -> PathBuf {
        self.dir.path().join("processed_files")
    }
}

/// `count` space-separated copies of `word`
#[allow(dead_code)] // Used in integration tests
pub fn repeated_words(word: &str, count: usize) -> String {
    vec![word; count].join(" ")
}
