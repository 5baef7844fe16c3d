//! WASM-compatible wrapper types for encoded artifacts.
//!
//! This module provides JavaScript-friendly types that wrap the core Image Lab
//! types, handling the conversion between Rust and JavaScript data representations.

use imagelab_core::EncodedImage;
use wasm_bindgen::prelude::*;

/// An encoded image artifact for JavaScript.
///
/// Holds the file bytes together with the format name (`"jpeg"` or `"png"`)
/// and the MIME type, ready to be wrapped in a `Blob`.
///
/// # Memory Management
///
/// The bytes are stored in WASM memory. When you call `bytes()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsEncodedImage {
    bytes: Vec<u8>,
    format: String,
    content_type: String,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Encoded file bytes as Uint8Array.
    ///
    /// Note: This creates a copy of the data.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Format name: `"jpeg"` or `"png"`
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.clone()
    }

    /// MIME type, e.g. `"image/png"`
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.content_type.clone()
    }

    /// Conventional file extension without the dot
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        match self.format.as_str() {
            "jpeg" => "jpg".to_string(),
            other => other.to_string(),
        }
    }

    /// Number of encoded bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<EncodedImage> for JsEncodedImage {
    fn from(encoded: EncodedImage) -> Self {
        Self {
            format: encoded.format.to_string(),
            content_type: encoded.content_type.to_string(),
            bytes: encoded.bytes,
        }
    }
}
