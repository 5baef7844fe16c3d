//! Image encoding for Image Lab result artifacts.
//!
//! This module provides functionality for:
//! - Encoding result images to JPEG with configurable quality
//! - Encoding result images and histogram charts to PNG
//!
//! Each call produces one [`EncodedImage`]: the bytes plus the format and the
//! content type a storage layer needs to serve them.
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::config::EncodeConfig;
//! use imagelab_core::encode::encode;
//! use imagelab_core::EncodingFormat;
//!
//! let image = image::DynamicImage::new_rgb8(100, 100);
//! let encoded = encode(&image, EncodingFormat::Jpeg, &EncodeConfig::default()).unwrap();
//! println!("Encoded {} bytes as {}", encoded.bytes.len(), encoded.content_type);
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use crate::config::EncodeConfig;
use crate::format::EncodingFormat;

/// Errors that can occur while encoding a result image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: EncodingFormat,
        message: String,
    },
}

/// An encoded artifact ready to be stored or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
    /// Format the bytes are in.
    pub format: EncodingFormat,
    /// MIME type for `format`.
    pub content_type: &'static str,
}

impl EncodedImage {
    fn new(bytes: Vec<u8>, format: EncodingFormat) -> Self {
        Self {
            bytes,
            format,
            content_type: format.content_type(),
        }
    }
}

/// Encode an image in the given format.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for empty images and
/// `EncodeError::EncodingFailed` when the codec fails.
pub fn encode(
    image: &DynamicImage,
    format: EncodingFormat,
    config: &EncodeConfig,
) -> Result<EncodedImage, EncodeError> {
    let bytes = match format {
        EncodingFormat::Jpeg => encode_jpeg(image, config.jpeg_quality)?,
        EncodingFormat::Png => encode_png(image)?,
    };

    debug!(
        %format,
        width = image.width(),
        height = image.height(),
        size = bytes.len(),
        "encoded image"
    );

    Ok(EncodedImage::new(bytes, format))
}

fn check_dimensions(image: &DynamicImage) -> Result<(), EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    Ok(())
}
