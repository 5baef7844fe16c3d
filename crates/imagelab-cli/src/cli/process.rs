//! The `imagelab process` command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use imagelab_core::naming::{
    base_name, combined_histogram_key, combined_key, independent_key, original_histogram_key,
};
use imagelab_core::{
    parse_operations, EncodeError, EncodedImage, HistogramTitles, ProcessRequest, Processor,
};
use tracing::{info, warn};

use super::{load_config, read_input, write_artifact};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// JPEG or PNG file to process
    #[arg(required = true)]
    pub input: PathBuf,

    /// Comma-separated operations, applied in order (e.g. "grayscale,blur")
    #[arg(short, long)]
    pub ops: String,

    /// Directory the results are written to
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write before/after histogram charts
    #[arg(long)]
    pub histograms: bool,

    /// Title of the source histogram
    #[arg(long, default_value = "Original Image")]
    pub original_title: String,

    /// Title of the processed histogram
    #[arg(long, default_value = "Processed Image")]
    pub processed_title: String,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// What one run wrote.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub written: Vec<PathBuf>,
    pub failed: usize,
}

/// Execute the process command.
pub fn execute(args: ProcessArgs) -> anyhow::Result<ProcessReport> {
    let config = load_config(args.config.as_deref())?;
    let processor = Processor::new(config);

    let bytes = read_input(&args.input)?;
    let mut request = ProcessRequest::new(&parse_operations(&args.ops));
    if args.histograms {
        request = request.with_histograms(HistogramTitles {
            original: args.original_title.clone(),
            processed: args.processed_title.clone(),
        });
    }

    let output = processor
        .process(&bytes, &request)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let base = base_name(&args.input);
    let mut report = ProcessReport::default();

    let combined_name = output
        .combined
        .as_ref()
        .map(|encoded| combined_key(&base, encoded.format))
        .unwrap_or_else(|_| "combined".to_string());
    save(&args.out_dir, &combined_name, &output.combined, &mut report)?;

    for (id, result) in &output.independent {
        let name = result
            .as_ref()
            .map(|encoded| independent_key(&base, *id, encoded.format))
            .unwrap_or_else(|_| id.to_string());
        save(&args.out_dir, &name, result, &mut report)?;
    }

    if let Some(histograms) = &output.histograms {
        save(
            &args.out_dir,
            &original_histogram_key(&base),
            &histograms.original,
            &mut report,
        )?;
        save(
            &args.out_dir,
            &combined_histogram_key(&base),
            &histograms.combined,
            &mut report,
        )?;
    }

    info!(
        input = %args.input.display(),
        written = report.written.len(),
        failed = report.failed,
        skipped = ?output.skipped,
        "done"
    );
    for path in &report.written {
        println!("{}", path.display());
    }

    Ok(report)
}

/// Write one artifact, or log and count its encode failure.
fn save(
    dir: &Path,
    name: &str,
    result: &Result<EncodedImage, EncodeError>,
    report: &mut ProcessReport,
) -> anyhow::Result<()> {
    match result {
        Ok(encoded) => {
            let path = write_artifact(dir, name, &encoded.bytes)?;
            report.written.push(path);
        }
        Err(e) => {
            warn!(artifact = name, error = %e, "artifact not written");
            report.failed += 1;
        }
    }
    Ok(())
}
