//! Verify command - check index postings against the stored chunks

use crate::cli::output::{colors, print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Indexed folder
    #[arg(long, short = 'f')]
    pub folder: PathBuf,
}

/// Execute the verify command
///
/// Prints the report, then fails when the index is inconsistent so
/// the process exits non-zero.
pub fn execute(
    args: VerifyArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = services.verify_folder(&args.folder)?;

    match format {
        OutputFormat::Human => {
            println!(
                "Checked {} keys, {} postings across {} storage files and {} manifests",
                colors::number(&report.keys_checked.to_string()),
                colors::number(&report.postings_checked.to_string()),
                colors::number(&report.storage_files_checked.to_string()),
                colors::number(&report.manifests_checked.to_string())
            );

            if report.is_consistent {
                print_success("Index is consistent");
            } else {
                println!(
                    "  Missing chunks:        {}",
                    colors::number(&report.missing_chunks.to_string())
                );
                println!(
                    "  Mismatched postings:   {}",
                    colors::number(&report.mismatched_postings.to_string())
                );
                println!(
                    "  Missing storage files: {}",
                    colors::number(&report.missing_storage_files.to_string())
                );
                for problem in &report.problems {
                    print_warning(problem);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if report.is_consistent {
        Ok(())
    } else {
        Err(format!(
            "Index of '{}' is inconsistent. Re-index the folder after removing its processed directory.",
            args.folder.display()
        )
        .into())
    }
}
