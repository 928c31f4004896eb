//! chunkdex CLI - chunk, index and search folders of documents
//!
//! # Examples
//!
//! ```bash
//! # Index a folder (creates ./papers/processed_files)
//! chunkdex index ./papers
//!
//! # Search it
//! chunkdex search "gradient descent" --folder ./papers -k 5
//!
//! # Print one chunk
//! chunkdex get-chunk intro.pdf.0000.chunks.json 3 --folder ./papers
//!
//! # Check the index against the stored chunks
//! chunkdex verify --folder ./papers
//! ```

use clap::Parser;
use chunkdex::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout stays clean for command output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "chunkdex=info".into());
    let json = std::env::var("CHUNKDEX_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
