//! Stats command - storage and index statistics of an indexed folder

use crate::cli::output::{colors, format_bytes};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Indexed folder
    #[arg(long, short = 'f')]
    pub folder: PathBuf,
}

/// Execute the stats command
pub fn execute(
    args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = services.open_folder(&args.folder)?;
    let stats = manager.stats()?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::label("Processed directory:"),
                colors::file_path(&stats.processed_dir.display().to_string())
            );
            println!(
                "  Documents:     {}",
                colors::number(&stats.documents.to_string())
            );
            println!(
                "  Chunks:        {}",
                colors::number(&stats.chunks.to_string())
            );
            println!(
                "  Storage files: {} ({})",
                colors::number(&stats.storage_files.to_string()),
                colors::number(&format_bytes(stats.storage_bytes))
            );
            println!(
                "  N-gram keys:   {}",
                colors::number(&stats.index_keys.to_string())
            );
            println!(
                "  Postings:      {}",
                colors::number(&stats.index_postings.to_string())
            );
            println!(
                "  Index size:    {}",
                colors::number(&format_bytes(stats.index_bytes))
            );
            println!(
                "  Disk usage:    {}",
                colors::number(&format_bytes(manager.disk_usage()))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
