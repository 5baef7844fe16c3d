//! Histogram WASM bindings.
//!
//! This module provides JavaScript bindings for histogram computation and
//! chart rendering from an encoded file.

use imagelab_core::{Histogram, Processor};
use wasm_bindgen::prelude::*;

use crate::process::to_js_error;
use crate::types::JsEncodedImage;

/// Histogram result accessible from JavaScript.
///
/// Contains 256-bin histograms for the red, green and blue channels and the
/// tallest bin for normalization.
#[wasm_bindgen]
pub struct JsHistogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    max_value: u32,
    pixel_count: f64,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel histogram (256 bins).
    pub fn red(&self) -> Vec<u32> {
        self.red.clone()
    }

    /// Get green channel histogram (256 bins).
    pub fn green(&self) -> Vec<u32> {
        self.green.clone()
    }

    /// Get blue channel histogram (256 bins).
    pub fn blue(&self) -> Vec<u32> {
        self.blue.clone()
    }

    /// Get maximum bin value across all RGB channels.
    ///
    /// Useful for normalizing histogram display.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Number of pixels that were binned after sampling.
    #[wasm_bindgen(getter)]
    pub fn pixel_count(&self) -> f64 {
        self.pixel_count
    }
}

impl From<Histogram> for JsHistogram {
    fn from(hist: Histogram) -> Self {
        Self {
            max_value: hist.max_value(),
            pixel_count: hist.pixel_count() as f64,
            red: hist.red.to_vec(),
            green: hist.green.to_vec(),
            blue: hist.blue.to_vec(),
        }
    }
}

/// Compute the histogram of an encoded JPEG or PNG file.
///
/// # Example (TypeScript)
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const hist = compute_histogram(bytes);
///
/// const redBins = hist.red();        // Uint32Array[256]
/// const max = hist.max_value;        // For normalization
///
/// // Don't forget to free!
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(bytes: &[u8]) -> Result<JsHistogram, JsValue> {
    Processor::default()
        .compute_histogram(bytes)
        .map(JsHistogram::from)
        .map_err(to_js_error)
}

/// Render the histogram chart of an encoded file as PNG.
///
/// An empty `title` falls back to a generic caption.
#[wasm_bindgen]
pub fn render_histogram(bytes: &[u8], title: &str) -> Result<JsEncodedImage, JsValue> {
    Processor::default()
        .histogram(bytes, title)
        .map(JsEncodedImage::from)
        .map_err(to_js_error)
}
