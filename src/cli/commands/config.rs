//! Config command - show current configuration

use crate::cli::output::format_bytes;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub exports_dir: String,
    #[serde(flatten)]
    pub config: &'a crate::core::config::Config,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        exports_dir: xdg.exports_dir().to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  exports_dir: {}", response.exports_dir);
            println!("  chunking:");
            println!("    window_chars: {}", config.chunking.window_chars);
            println!(
                "    max_chunk_bytes: {} ({})",
                config.chunking.max_chunk_bytes,
                format_bytes(config.chunking.max_chunk_bytes as u64)
            );
            println!("    max_ngram: {}", config.chunking.max_ngram);
            match &config.chunking.lemma_lexicon {
                Some(path) => println!("    lemma_lexicon: {}", path.display()),
                None => println!("    lemma_lexicon: (none)"),
            }
            println!("  storage:");
            println!(
                "    processed_dir_name: {}",
                config.storage.processed_dir_name
            );
            println!(
                "    max_storage_file_bytes: {} ({})",
                config.storage.max_storage_file_bytes,
                format_bytes(config.storage.max_storage_file_bytes as u64)
            );
            println!("    index_file_name: {}", config.storage.index_file_name);
            println!("  indexing:");
            println!(
                "    include_patterns: {:?}",
                config.indexing.include_patterns
            );
            println!(
                "    exclude_patterns: {:?}",
                config.indexing.exclude_patterns
            );
            println!("    max_file_size_mb: {}", config.indexing.max_file_size_mb);
            println!("  search:");
            println!("    default_k: {}", config.search.default_k);
            println!("    max_k: {}", config.search.max_k);
            println!("    max_query_length: {}", config.search.max_query_length);
            match config.search.min_relevance {
                Some(min) => println!("    min_relevance: {min}"),
                None => println!("    min_relevance: off"),
            }
            println!("  extraction:");
            println!("    external_tools: {}", config.extraction.external_tools);
            println!("    pandoc: {}", config.extraction.pandoc);
            println!("    pdftotext: {}", config.extraction.pdftotext);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
