//! Get-chunk command - print one stored chunk

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Chunk, ChunkAddress};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the get-chunk command
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Storage file name, relative to the processed directory
    pub storage_file: PathBuf,

    /// Chunk id inside the storage file
    pub chunk_id: usize,

    /// Indexed folder holding the chunk
    #[arg(long, short = 'f')]
    pub folder: PathBuf,

    /// Also show words, stems, lemmas and n-grams
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Chunk response
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub address: String,
    #[serde(flatten)]
    pub chunk: Chunk,
}

/// Execute the get-chunk command
pub fn execute(
    args: ChunkArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = services.open_folder(&args.folder)?;
    let address = ChunkAddress::new(args.storage_file, args.chunk_id);
    let chunk = manager.store().load(&address)?;

    let response = ChunkResponse {
        address: address.to_string(),
        chunk,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::label("Chunk:"),
                colors::file_path(&response.address)
            );
            println!(
                "{} {} chars, {} words, {} n-grams\n",
                colors::label("Size:"),
                colors::number(&response.chunk.content.chars().count().to_string()),
                colors::number(&response.chunk.words.len().to_string()),
                colors::number(&response.chunk.n_grams.len().to_string())
            );
            println!("{}", response.chunk.content);

            if args.verbose {
                println!();
                println!("{} {}", colors::label("Words:"), response.chunk.words.join(" "));
                println!(
                    "{} {}",
                    colors::label("Stems:"),
                    response.chunk.stemmed_words.join(" ")
                );
                println!(
                    "{} {}",
                    colors::label("Lemmas:"),
                    response.chunk.lemmatized_words.join(" ")
                );
                println!(
                    "{} {}",
                    colors::label("N-grams:"),
                    response.chunk.n_grams.join(" | ")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
