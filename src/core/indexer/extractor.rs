//! Turning documents into plain text.
//!
//! Plain text and markdown are read directly. PDF and office formats
//! go through external converters (`pdftotext`, `pandoc`) when those
//! are enabled. Anything else is skipped.

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::ExtractionConfig;
use crate::core::error::{ChunkdexError, Result};

/// Why a file produced no text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No extractor handles the file's extension
    Unsupported,
    /// The file is not valid UTF-8 text
    NotUtf8,
    /// The format needs an external tool and those are disabled
    ToolsDisabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Unsupported => "unsupported format",
            SkipReason::NotUtf8 => "not valid UTF-8",
            SkipReason::ToolsDisabled => "external tools disabled",
        };
        f.write_str(reason)
    }
}

/// Result of extracting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Skip(SkipReason),
}

/// Produces the text of a document.
pub trait TextExtractor {
    /// Extract text, or signal that the file should be skipped.
    ///
    /// Errors are reserved for files that should have been readable
    /// (I/O failures, converter crashes).
    fn extract(&self, path: &Path) -> Result<Extraction>;

    /// Lowercase extensions (without dot) this extractor accepts
    fn extensions(&self) -> &[&'static str];

    /// Get the name of this extractor.
    fn name(&self) -> &'static str;
}

/// Lowercase extension of `path`, if any
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Reads `.txt` and markdown files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<Extraction> {
        let bytes = fs::read(path).map_err(|e| {
            ChunkdexError::ExtractionFailed(format!("Failed to read {path:?}: {e}"))
        })?;

        let Ok(text) = String::from_utf8(bytes) else {
            return Ok(Extraction::Skip(SkipReason::NotUtf8));
        };

        match extension_of(path).as_deref() {
            Some("md" | "markdown") => Ok(Extraction::Text(strip_markdown(&text))),
            _ => Ok(Extraction::Text(text)),
        }
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt", "md", "markdown"]
    }

    fn name(&self) -> &'static str {
        "plain-text"
    }
}

const PATTERN: &str = "valid markdown pattern";

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*(```|~~~).*$").expect(PATTERN));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").expect(PATTERN));
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}>[ \t]?").expect(PATTERN));
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+").expect(PATTERN));
static IMAGE_OR_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect(PATTERN));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect(PATTERN));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\*\*|__|\*|`)").expect(PATTERN));

/// Reduce markdown to its prose.
///
/// Code fence delimiters are dropped but fenced code is kept as text.
/// Links and images become their label. Single underscores are left
/// alone since they belong to identifiers.
pub fn strip_markdown(markdown: &str) -> String {
    let text = FENCE.replace_all(markdown, "");
    let text = HEADING.replace_all(&text, "");
    let text = BLOCKQUOTE.replace_all(&text, "");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = IMAGE_OR_LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "");
    text.into_owned()
}

/// Converts PDF and office documents with external programs.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    pandoc: String,
    pdftotext: String,
}

impl CommandExtractor {
    pub fn new(pandoc: impl Into<String>, pdftotext: impl Into<String>) -> Self {
        Self {
            pandoc: pandoc.into(),
            pdftotext: pdftotext.into(),
        }
    }

    fn run(&self, command: &mut Command, path: &Path) -> Result<String> {
        let program = command.get_program().to_string_lossy().into_owned();

        let output = command.output().map_err(|e| {
            ChunkdexError::ExtractionFailed(format!("Failed to run {program} on {path:?}: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChunkdexError::ExtractionFailed(format!(
                "{program} exited with {} on {path:?}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new("pandoc", "pdftotext")
    }
}

impl TextExtractor for CommandExtractor {
    fn extract(&self, path: &Path) -> Result<Extraction> {
        let text = match extension_of(path).as_deref() {
            Some("pdf") => self.run(
                Command::new(&self.pdftotext).arg("-layout").arg(path).arg("-"),
                path,
            )?,
            Some("docx" | "odt" | "pptx" | "ppt" | "doc") => self.run(
                Command::new(&self.pandoc).arg("-t").arg("plain").arg(path),
                path,
            )?,
            _ => return Ok(Extraction::Skip(SkipReason::Unsupported)),
        };

        Ok(Extraction::Text(text))
    }

    fn extensions(&self) -> &[&'static str] {
        &["pdf", "docx", "odt", "pptx", "ppt", "doc"]
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Dispatches each file to the extractor registered for its extension.
pub struct FormatRouter {
    extractors: Vec<Box<dyn TextExtractor>>,
    /// Extensions known to need disabled external tools
    disabled: Vec<&'static str>,
}

impl FormatRouter {
    /// Router with no extractors; every file is skipped
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
            disabled: Vec::new(),
        }
    }

    /// Router for the configured extraction settings
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut router = Self::empty();
        router.register(Box::new(PlainTextExtractor));

        let commands = CommandExtractor::new(&config.pandoc, &config.pdftotext);
        if config.external_tools {
            router.register(Box::new(commands));
        } else {
            router.disabled = commands.extensions().to_vec();
        }

        router
    }

    /// Add an extractor; earlier registrations win on shared extensions
    pub fn register(&mut self, extractor: Box<dyn TextExtractor>) {
        self.extractors.push(extractor);
    }

    fn extractor_for(&self, extension: &str) -> Option<&dyn TextExtractor> {
        self.extractors
            .iter()
            .find(|e| e.extensions().iter().any(|ext| *ext == extension))
            .map(|e| e.as_ref())
    }
}

impl TextExtractor for FormatRouter {
    fn extract(&self, path: &Path) -> Result<Extraction> {
        let Some(extension) = extension_of(path) else {
            return Ok(Extraction::Skip(SkipReason::Unsupported));
        };

        match self.extractor_for(&extension) {
            Some(extractor) => {
                tracing::debug!("Extracting {:?} with {}", path, extractor.name());
                extractor.extract(path)
            }
            None if self.disabled.iter().any(|ext| *ext == extension) => {
                Ok(Extraction::Skip(SkipReason::ToolsDisabled))
            }
            None => Ok(Extraction::Skip(SkipReason::Unsupported)),
        }
    }

    fn extensions(&self) -> &[&'static str] {
        &[]
    }

    fn name(&self) -> &'static str {
        "router"
    }
}
