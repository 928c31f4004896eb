//! Index command - chunk and index a folder of documents

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::indexer::IndexingPipeline;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Folder containing the documents to index
    pub path: PathBuf,

    /// Glob patterns to include (can be specified multiple times)
    #[arg(long, short = 'i')]
    pub include: Vec<String>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    pub files_seen: usize,
    pub documents_indexed: usize,
    pub documents_already_processed: usize,
    pub files_unsupported: usize,
    pub files_failed: usize,
    pub chunks_created: usize,
    pub storage_files_written: usize,
    pub index_keys: usize,
    pub duration_secs: f64,
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the folder exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    if !path.is_dir() {
        return Err(format!(
            "Path '{}' is not a directory. chunkdex indexes folders, not individual files.",
            path.display()
        )
        .into());
    }

    let mut config = (*services.config).clone();
    if !args.include.is_empty() {
        config.indexing.include_patterns = args.include;
    }
    if !args.exclude.is_empty() {
        config.indexing.exclude_patterns = args.exclude;
    }

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {}...",
            colors::file_path(&path.display().to_string())
        );
    }

    let stats = IndexingPipeline::from_config(&config)?.process_folder(&path)?;

    let response = IndexResponse {
        path: path.to_string_lossy().into_owned(),
        files_seen: stats.files_seen,
        documents_indexed: stats.documents_indexed,
        documents_already_processed: stats.documents_already_processed,
        files_unsupported: stats.files_unsupported,
        files_failed: stats.files_failed,
        chunks_created: stats.chunks_created,
        storage_files_written: stats.storage_files_written,
        index_keys: stats.index_keys,
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} documents ({} chunks, {} storage files) in {}",
                colors::success("Indexed"),
                colors::number(&response.documents_indexed.to_string()),
                colors::number(&response.chunks_created.to_string()),
                colors::number(&response.storage_files_written.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.documents_already_processed > 0 {
                println!(
                    "Already processed: {}",
                    colors::number(&response.documents_already_processed.to_string())
                );
            }
            if response.files_unsupported > 0 || response.files_failed > 0 {
                println!(
                    "Skipped: {} unsupported, {} failed",
                    colors::number(&response.files_unsupported.to_string()),
                    colors::number(&response.files_failed.to_string())
                );
            }
            println!(
                "Index keys: {}",
                colors::number(&response.index_keys.to_string())
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
