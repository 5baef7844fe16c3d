//! End-to-end processing of one uploaded image.
//!
//! Decode once, run the pipeline, then encode every artifact separately. A
//! failure to encode one artifact is recorded in its slot and never stops the
//! others; only a decode failure or an unusable operation list fails the
//! whole invocation.

use std::collections::BTreeMap;

use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::decode::{decode, DecodeError, DecodedImage};
use crate::encode::{encode, EncodeError, EncodedImage};
use crate::format::EncodingFormat;
use crate::histogram;
use crate::operations::{lookup, OperationId};
use crate::pipeline::{self, PipelineResult, Variant};

/// Errors that fail a whole processing invocation.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input could not be decoded; no operation ran
    #[error("Failed to decode input: {0}")]
    Decode(#[from] DecodeError),

    /// The operation list was empty
    #[error("No operations requested")]
    NoOperations,

    /// None of the requested names is a supported operation
    #[error("No valid operations in request: {}", .0.join(", "))]
    NoValidOperations(Vec<String>),

    /// A single requested artifact could not be encoded
    #[error("Failed to encode output: {0}")]
    Encode(#[from] EncodeError),
}

/// Titles printed on the two histogram charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramTitles {
    pub original: String,
    pub processed: String,
}

impl Default for HistogramTitles {
    fn default() -> Self {
        Self {
            original: "Original Image".to_string(),
            processed: "Processed Image".to_string(),
        }
    }
}

/// What to do with an image.
#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    /// Operation names, in sequential order.
    pub operations: Vec<String>,
    /// Render before/after histograms when set.
    pub histograms: Option<HistogramTitles>,
}

impl ProcessRequest {
    /// Request for the given operations, without histograms.
    pub fn new<S: AsRef<str>>(operations: &[S]) -> Self {
        Self {
            operations: operations.iter().map(|op| op.as_ref().to_string()).collect(),
            histograms: None,
        }
    }

    /// Also render histograms with the given titles.
    pub fn with_histograms(mut self, titles: HistogramTitles) -> Self {
        self.histograms = Some(titles);
        self
    }
}

/// Encoded before/after histogram charts.
#[derive(Debug)]
pub struct HistogramOutput {
    pub original: Result<EncodedImage, EncodeError>,
    pub combined: Result<EncodedImage, EncodeError>,
}

/// Every artifact of one invocation.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Format the input was decoded from.
    pub source_format: EncodingFormat,
    /// Operations applied to the sequential result, in order.
    pub applied: Vec<OperationId>,
    /// Requested names that matched no operation.
    pub skipped: Vec<String>,
    /// The sequential result.
    pub combined: Result<EncodedImage, EncodeError>,
    /// One result per distinct applied operation.
    pub independent: BTreeMap<OperationId, Result<EncodedImage, EncodeError>>,
    /// Present when histograms were requested.
    pub histograms: Option<HistogramOutput>,
}

impl ProcessOutput {
    /// Number of artifacts that failed to encode.
    pub fn failed_artifacts(&self) -> usize {
        let histogram_failures = self.histograms.as_ref().map_or(0, |h| {
            usize::from(h.original.is_err()) + usize::from(h.combined.is_err())
        });
        usize::from(self.combined.is_err())
            + self.independent.values().filter(|r| r.is_err()).count()
            + histogram_failures
    }
}

/// Check an operation list before any decoding work is done.
///
/// Unknown names alongside at least one known name are allowed; they are
/// skipped during processing.
pub fn validate_operations<S: AsRef<str>>(operations: &[S]) -> Result<(), ProcessError> {
    if operations.is_empty() {
        return Err(ProcessError::NoOperations);
    }
    if !operations.iter().any(|op| lookup(op.as_ref()).is_some()) {
        return Err(ProcessError::NoValidOperations(
            operations.iter().map(|op| op.as_ref().to_string()).collect(),
        ));
    }
    Ok(())
}

/// Runs decode, pipeline, histograms and encode with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: Config,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode input bytes with the configured limits.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode(bytes, &self.config.decode)
    }

    /// Encode an image with the configured encoder settings.
    pub fn encode(
        &self,
        image: &DynamicImage,
        format: EncodingFormat,
    ) -> Result<EncodedImage, EncodeError> {
        encode(image, format, &self.config.encode)
    }

    /// Process raw input bytes.
    pub fn process(
        &self,
        bytes: &[u8],
        request: &ProcessRequest,
    ) -> Result<ProcessOutput, ProcessError> {
        validate_operations(&request.operations)?;
        let decoded = self.decode(bytes)?;
        Ok(self.process_decoded(&decoded, request))
    }

    /// Process an already decoded image.
    ///
    /// The operation list is not validated here; an empty or all-unknown list
    /// simply yields a copy of the source.
    pub fn process_decoded(&self, decoded: &DecodedImage, request: &ProcessRequest) -> ProcessOutput {
        let PipelineResult {
            sequential,
            applied,
            skipped,
            independent,
        } = pipeline::run(&decoded.image, decoded.format, &request.operations);

        if !skipped.is_empty() {
            warn!(skipped = ?skipped, "some requested operations were skipped");
        }

        let histograms = request.histograms.as_ref().map(|titles| HistogramOutput {
            original: self.encode_histogram(&decoded.image, &titles.original),
            combined: self.encode_histogram(&sequential.image, &titles.processed),
        });

        let combined = self.encode_variant("combined", &sequential);
        let independent = independent
            .iter()
            .map(|(&id, variant)| (id, self.encode_variant(id.as_str(), variant)))
            .collect();

        info!(
            source_format = %decoded.format,
            color_mode = ?decoded.color_mode(),
            applied = applied.len(),
            skipped = skipped.len(),
            "processed image"
        );

        ProcessOutput {
            source_format: decoded.format,
            applied,
            skipped,
            combined,
            independent,
            histograms,
        }
    }

    /// Decode `bytes` and render its histogram chart as PNG.
    pub fn histogram(&self, bytes: &[u8], title: &str) -> Result<EncodedImage, ProcessError> {
        let decoded = self.decode(bytes)?;
        Ok(self.encode_histogram(&decoded.image, title)?)
    }

    /// Decode `bytes` and count its channel intensities.
    pub fn compute_histogram(&self, bytes: &[u8]) -> Result<histogram::Histogram, ProcessError> {
        let decoded = self.decode(bytes)?;
        Ok(histogram::compute(
            &decoded.image,
            self.config.histogram.max_pixels,
        ))
    }

    fn encode_variant(&self, artifact: &str, variant: &Variant) -> Result<EncodedImage, EncodeError> {
        let result = self.encode(&variant.image, variant.format);
        if let Err(e) = &result {
            warn!(artifact, error = %e, "failed to encode artifact");
        }
        result
    }

    fn encode_histogram(&self, image: &DynamicImage, title: &str) -> Result<EncodedImage, EncodeError> {
        let chart = histogram::render(image, title, self.config.histogram.max_pixels);
        debug!(title, "rendered histogram");
        let result = self.encode(&DynamicImage::ImageRgb8(chart), EncodingFormat::Png);
        if let Err(e) = &result {
            warn!(title, error = %e, "failed to encode histogram");
        }
        result
    }
}
