//! The `imagelab histogram` command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use imagelab_core::histogram::DEFAULT_TITLE;
use imagelab_core::naming::{base_name, histogram_key};
use imagelab_core::Processor;
use tracing::info;

use super::{load_config, read_input};

/// Arguments for the `histogram` command.
#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// JPEG or PNG file to analyze
    #[arg(required = true)]
    pub input: PathBuf,

    /// Chart title
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Output file (defaults to `<name>_hist.png` next to the input)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute the histogram command, returning the written path.
pub fn execute(args: HistogramArgs) -> anyhow::Result<PathBuf> {
    let processor = Processor::new(load_config(args.config.as_deref())?);
    let bytes = read_input(&args.input)?;

    let chart = processor
        .histogram(&bytes, &args.title)
        .with_context(|| format!("Failed to render histogram of {}", args.input.display()))?;

    let out = args
        .out
        .unwrap_or_else(|| args.input.with_file_name(histogram_key(&base_name(&args.input))));
    std::fs::write(&out, &chart.bytes)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    info!(path = %out.display(), "wrote histogram");
    println!("{}", out.display());
    Ok(out)
}
