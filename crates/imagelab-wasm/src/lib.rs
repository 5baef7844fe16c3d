//! Image Lab WASM - WebAssembly bindings for Image Lab
//!
//! This crate exposes the imagelab-core pipeline to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `process` - Sequential and independent processing of an uploaded file
//! - `histogram` - Histogram counts and chart rendering
//! - `types` - WASM-compatible wrapper types for encoded artifacts
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image, supported_operations } from '@imagelab/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const ops = supported_operations(); // [{ id: 'grayscale', label: 'Grayscale' }, ...]
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = process_image(bytes, 'grayscale,blur', false);
//! console.log(`Combined result is ${output.combined().byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod histogram;
mod process;
mod types;

// Re-export public types
pub use histogram::{compute_histogram, render_histogram, JsHistogram};
pub use process::{process_image, process_image_with_config, supported_operations, JsProcessOutput};
pub use types::JsEncodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
