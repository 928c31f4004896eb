//! Search command - query an indexed folder

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::search::export_hits;
use crate::core::services::Services;
use crate::core::types::SearchRequest;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Lines of chunk content shown per hit in human output
const PREVIEW_LINES: usize = 5;

/// Characters per preview line before truncation
const PREVIEW_WIDTH: usize = 100;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,

    /// Indexed folder to search
    #[arg(long, short = 'f')]
    pub folder: PathBuf,

    /// Maximum number of results (defaults to search.default_k)
    #[arg(short = 'k')]
    pub k: Option<usize>,

    /// Drop hits scoring below this fraction (0.0-1.0)
    #[arg(long)]
    pub min_relevance: Option<f64>,

    /// Only show chunk addresses (no content)
    #[arg(long)]
    pub files_only: bool,

    /// Write each hit to a text file in the exports directory
    #[arg(long)]
    pub export: bool,

    /// Directory for exported hits (implies --export)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub storage_file: String,
    pub chunk_id: usize,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub folder: String,
    pub total_results: usize,
    pub candidates: usize,
    pub duration_ms: u64,
    pub results: Vec<SearchResultItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exported: Vec<String>,
}

/// Shorten a line to `width` characters, on a char boundary
fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let kept: String = line.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        line.to_string()
    }
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = SearchRequest {
        query: args.query.clone(),
        k: args.k,
        min_relevance: args.min_relevance,
    };

    let response = services
        .search
        .search_folder(&args.folder, &request)
        .map_err(|e| {
            if e.is_not_found() {
                format!(
                    "{e}. Run 'chunkdex index {}' first.",
                    args.folder.display()
                )
            } else {
                e.to_string()
            }
        })?;

    let export_dir = match (args.export_dir, args.export) {
        (Some(dir), _) => Some(dir),
        (None, true) => Some(XdgDirs::new().exports_dir()),
        (None, false) => None,
    };
    let exported = match &export_dir {
        Some(dir) => export_hits(&response.hits, dir)?,
        None => Vec::new(),
    };

    let output = SearchResponseOutput {
        query: response.query.clone(),
        folder: args.folder.display().to_string(),
        total_results: response.count,
        candidates: response.candidates,
        duration_ms: response.duration_ms,
        results: response
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                storage_file: hit.address.storage_file.display().to_string(),
                chunk_id: hit.address.chunk_id,
                score: hit.score,
                text: if args.files_only {
                    None
                } else {
                    Some(hit.content.clone())
                },
            })
            .collect(),
        exported: exported
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!(
                    "No results found for '{}' in {}",
                    colors::label(&args.query),
                    colors::file_path(&output.folder)
                );
            } else {
                println!(
                    "Found {} result(s) from {} candidate chunk(s):\n",
                    colors::number(&output.total_results.to_string()),
                    colors::number(&output.candidates.to_string())
                );

                for result in &output.results {
                    let address = format!("{}#{}", result.storage_file, result.chunk_id);
                    if args.files_only {
                        println!("{}", colors::file_path(&address));
                        continue;
                    }

                    println!(
                        "[{}] {} {}",
                        colors::rank(&result.rank.to_string()),
                        colors::file_path(&address),
                        colors::score(&format!("(score: {:.2})", result.score))
                    );
                    if let Some(text) = &result.text {
                        for line in text.lines().take(PREVIEW_LINES) {
                            println!(
                                "    {}",
                                colors::dim(&truncate_line(line, PREVIEW_WIDTH))
                            );
                        }
                    }
                    println!();
                }
            }

            if let Some(dir) = &export_dir {
                println!(
                    "Exported {} hit(s) to {}",
                    colors::number(&output.exported.len().to_string()),
                    colors::file_path(&dir.display().to_string())
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
