//! Processing WASM bindings.
//!
//! Runs the full pipeline on an uploaded file: the sequential result, one
//! independent result per operation and, optionally, before/after histogram
//! charts.
//!
//! # Example
//!
//! ```typescript
//! import { process_image } from '@imagelab/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = process_image(bytes, 'grayscale,blur', true);
//!
//! const combined = output.combined();
//! const blob = new Blob([combined.bytes()], { type: combined.content_type });
//!
//! for (const op of output.independent_operations()) {
//!   const variant = output.independent(op);
//! }
//! ```

use std::collections::BTreeMap;

use imagelab_core::{
    parse_operations, Config, HistogramTitles, OperationId, ProcessError, ProcessOutput,
    ProcessRequest, Processor,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsEncodedImage;

/// Result of processing one image.
///
/// Artifacts that failed to encode are absent; their messages are listed by
/// `errors()`.
#[wasm_bindgen]
pub struct JsProcessOutput {
    source_format: String,
    combined: Option<JsEncodedImage>,
    independent: BTreeMap<OperationId, JsEncodedImage>,
    original_histogram: Option<JsEncodedImage>,
    processed_histogram: Option<JsEncodedImage>,
    applied: Vec<String>,
    skipped: Vec<String>,
    errors: Vec<String>,
}

#[wasm_bindgen]
impl JsProcessOutput {
    /// Format the input was decoded from: `"jpeg"` or `"png"`
    #[wasm_bindgen(getter)]
    pub fn source_format(&self) -> String {
        self.source_format.clone()
    }

    /// The sequential result of all operations.
    pub fn combined(&self) -> Option<JsEncodedImage> {
        self.combined.clone()
    }

    /// The result of applying only `operation` to the source.
    pub fn independent(&self, operation: &str) -> Option<JsEncodedImage> {
        let id = operation.parse::<OperationId>().ok()?;
        self.independent.get(&id).cloned()
    }

    /// Identifiers that have an independent result, in catalog order.
    pub fn independent_operations(&self) -> js_sys::Array {
        to_js_array(self.independent.keys().map(|id| id.as_str()))
    }

    /// Histogram chart of the source, when requested.
    pub fn original_histogram(&self) -> Option<JsEncodedImage> {
        self.original_histogram.clone()
    }

    /// Histogram chart of the sequential result, when requested.
    pub fn processed_histogram(&self) -> Option<JsEncodedImage> {
        self.processed_histogram.clone()
    }

    /// Operations applied to the sequential result, in order.
    pub fn applied(&self) -> js_sys::Array {
        to_js_array(self.applied.iter().map(String::as_str))
    }

    /// Requested names that matched no operation.
    pub fn skipped(&self) -> js_sys::Array {
        to_js_array(self.skipped.iter().map(String::as_str))
    }

    /// Encode failures, one message per missing artifact.
    pub fn errors(&self) -> js_sys::Array {
        to_js_array(self.errors.iter().map(String::as_str))
    }
}

impl JsProcessOutput {
    pub(crate) fn from_output(output: ProcessOutput) -> Self {
        let mut errors = Vec::new();
        let mut keep = |artifact: &str, result: Result<_, imagelab_core::EncodeError>| match result {
            Ok(encoded) => Some(JsEncodedImage::from(encoded)),
            Err(e) => {
                errors.push(format!("{artifact}: {e}"));
                None
            }
        };

        let combined = keep("combined", output.combined);
        let independent = output
            .independent
            .into_iter()
            .filter_map(|(id, result)| keep(id.as_str(), result).map(|encoded| (id, encoded)))
            .collect();
        let (original_histogram, processed_histogram) = match output.histograms {
            Some(histograms) => (
                keep("original histogram", histograms.original),
                keep("processed histogram", histograms.combined),
            ),
            None => (None, None),
        };

        Self {
            source_format: output.source_format.to_string(),
            combined,
            independent,
            original_histogram,
            processed_histogram,
            applied: output.applied.iter().map(|id| id.to_string()).collect(),
            skipped: output.skipped,
            errors,
        }
    }
}

fn to_js_array<'a>(items: impl Iterator<Item = &'a str>) -> js_sys::Array {
    items.map(JsValue::from_str).collect()
}

/// Process an image with the default configuration.
///
/// # Arguments
///
/// * `bytes` - JPEG or PNG file bytes as a `Uint8Array`
/// * `operations` - Comma-separated operation identifiers, e.g. `"grayscale,blur"`
/// * `histograms` - Also render before/after histogram charts
///
/// # Errors
///
/// Returns an error if the list is empty, names no supported operation, or the
/// bytes cannot be decoded. Unknown names next to known ones are skipped with a
/// console warning.
#[wasm_bindgen]
pub fn process_image(
    bytes: &[u8],
    operations: &str,
    histograms: bool,
) -> Result<JsProcessOutput, JsValue> {
    let output = run(&Processor::default(), bytes, operations, histograms).map_err(to_js_error)?;
    warn_skipped(&output);
    Ok(output)
}

/// Process an image with a configuration object.
///
/// `config` has the same shape as the TOML configuration, e.g.
/// `{ decode: { max_dimension: 2048 }, encode: { jpeg_quality: 80 } }`.
/// Omitted fields keep their defaults.
#[wasm_bindgen]
pub fn process_image_with_config(
    bytes: &[u8],
    operations: &str,
    histograms: bool,
    config: JsValue,
) -> Result<JsProcessOutput, JsValue> {
    let config: Config = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
    config.validate().map_err(to_js_error)?;

    let output = run(&Processor::new(config), bytes, operations, histograms).map_err(to_js_error)?;
    warn_skipped(&output);
    Ok(output)
}

/// Catalog entry as exposed to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OperationInfo {
    id: &'static str,
    label: &'static str,
}

pub(crate) fn operation_catalog() -> Vec<OperationInfo> {
    OperationId::ALL
        .into_iter()
        .map(|id| OperationInfo {
            id: id.as_str(),
            label: id.label(),
        })
        .collect()
}

/// List the supported operations as `{ id, label }` objects, in catalog order.
#[wasm_bindgen]
pub fn supported_operations() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&operation_catalog()).map_err(to_js_error)
}

pub(crate) fn run(
    processor: &Processor,
    bytes: &[u8],
    operations: &str,
    histograms: bool,
) -> Result<JsProcessOutput, ProcessError> {
    let mut request = ProcessRequest::new(&parse_operations(operations));
    if histograms {
        request = request.with_histograms(HistogramTitles::default());
    }
    let output = processor.process(bytes, &request)?;
    Ok(JsProcessOutput::from_output(output))
}

fn warn_skipped(output: &JsProcessOutput) {
    for name in &output.skipped {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Unknown operation '{name}' skipped"
        )));
    }
}

pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
