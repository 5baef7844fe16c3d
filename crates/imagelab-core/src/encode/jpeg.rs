//! JPEG encoding for lossy results.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG carries no alpha channel, so images with alpha are flattened to their
//! color (or luminance) channels before encoding.

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use super::{check_dimensions, EncodeError};
use crate::format::EncodingFormat;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_dimensions(image)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let prepared = without_alpha(image);
    let color: ExtendedColorType = prepared.color().into();

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            prepared.as_bytes(),
            prepared.width(),
            prepared.height(),
            color,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: EncodingFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Borrow the image when JPEG can take it directly, otherwise drop alpha.
fn without_alpha(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        DynamicImage::ImageLumaA8(_) => Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
