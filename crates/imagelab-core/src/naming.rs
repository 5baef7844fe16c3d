//! Artifact naming.
//!
//! For an input called `photo.png` processed with `grayscale,blur`:
//!
//! | artifact             | name                         |
//! |----------------------|------------------------------|
//! | sequential result    | `photo_combined.jpg`         |
//! | independent results  | `photo_grayscale.jpg`, `photo_blur.png` |
//! | source histogram     | `photo_original_hist.png`    |
//! | result histogram     | `photo_combined_hist.png`    |
//!
//! Extensions follow the format each artifact was actually encoded in, so an
//! operation that forces JPEG yields a `.jpg` even for PNG input.

use std::path::Path;

use crate::format::EncodingFormat;
use crate::operations::OperationId;

/// Suffix of the sequential result.
pub const COMBINED_SUFFIX: &str = "combined";
/// Suffix of the source histogram.
pub const ORIGINAL_SUFFIX: &str = "original";

/// The part of an input file name artifacts are named after: the file name
/// without directories or its final extension.
///
/// Falls back to `"image"` for paths with no usable stem.
pub fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "image".to_string())
}

/// `{base}_{op}.{ext}`
pub fn independent_key(base: &str, op: OperationId, format: EncodingFormat) -> String {
    format!("{base}_{op}.{}", format.extension())
}

/// `{base}_combined.{ext}`
pub fn combined_key(base: &str, format: EncodingFormat) -> String {
    format!("{base}_{COMBINED_SUFFIX}.{}", format.extension())
}

/// `{stem}_hist.png`
pub fn histogram_key(stem: &str) -> String {
    format!("{stem}_hist.{}", EncodingFormat::Png.extension())
}

/// Histogram name for the source image.
pub fn original_histogram_key(base: &str) -> String {
    histogram_key(&format!("{base}_{ORIGINAL_SUFFIX}"))
}

/// Histogram name for the sequential result.
pub fn combined_histogram_key(base: &str) -> String {
    histogram_key(&format!("{base}_{COMBINED_SUFFIX}"))
}
