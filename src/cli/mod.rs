//! CLI adapter for chunkdex
//!
//! Command line front end over the core indexing and search services.
//! Depends on `core/`; nothing in `core/` depends on it.
//!
//! # Architecture
//!
//! ```text
//!   +------------------+
//!   |     core/        |
//!   |  (domain logic)  |
//!   +--------+---------+
//!            |
//!            v
//!   +------------------+
//!   |      cli/        |
//!   | (clap adapter)   |
//!   +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// chunkdex - n-gram document search
///
/// Splits the documents of a folder into chunks, builds an n-gram
/// inverted index over them and answers free-text queries by n-gram
/// overlap.
#[derive(Parser, Debug)]
#[command(name = "chunkdex")]
#[command(version)]
#[command(about = "N-gram chunk index and phrase search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk and index every new document in a folder
    Index(commands::IndexArgs),

    /// Search an indexed folder
    Search(commands::SearchArgs),

    /// Print a single stored chunk
    #[command(name = "get-chunk")]
    GetChunk(commands::ChunkArgs),

    /// Show storage and index statistics of an indexed folder
    Stats(commands::StatsArgs),

    /// Check every index posting against the stored chunks
    Verify(commands::VerifyArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  chunkdex completions bash > ~/.local/share/bash-completion/completions/chunkdex
    ///   zsh:   chunkdex completions zsh > ~/.zfunc/_chunkdex
    ///   fish:  chunkdex completions fish > ~/.config/fish/completions/chunkdex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Completions need no configuration
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    XdgDirs::new().log_paths();

    let config = Config::load()?;
    config.log_config();

    let services = Arc::new(Services::new(config));

    match cli.command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::GetChunk(args) => commands::chunk::execute(args, &services, cli.format),
        Commands::Stats(args) => commands::stats::execute(args, &services, cli.format),
        Commands::Verify(args) => commands::verify::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
