//! Image Lab CLI - Apply image operations and render color histograms.
//!
//! Reads one JPEG or PNG file, applies the requested operations both in
//! sequence and one at a time, and writes every result next to each other in
//! an output directory.
//!
//! # Usage
//!
//! ```bash
//! # Grayscale then blur, plus one file per operation
//! imagelab process photo.jpg --ops grayscale,blur --out-dir ./out
//!
//! # Also write before/after histograms
//! imagelab process photo.png --ops sepia --histograms
//!
//! # List the supported operations
//! imagelab operations
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Image Lab - Apply image operations and render color histograms.
#[derive(Parser, Debug)]
#[command(name = "imagelab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply operations to an image and write every result
    Process(cli::process::ProcessArgs),

    /// List the supported operations
    Operations,

    /// Render the color histogram of an image
    Histogram(cli::histogram::HistogramArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    tracing::debug!("Image Lab v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Process(args) => cli::process::execute(args).map(|_| ()),
        Commands::Operations => cli::operations::execute(),
        Commands::Histogram(args) => cli::histogram::execute(args).map(|_| ()),
    }
}
