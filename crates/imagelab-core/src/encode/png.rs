//! PNG encoding for lossless results and histogram charts.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use super::{check_dimensions, EncodeError};
use crate::format::EncodingFormat;

/// Encode an 8-bit image to PNG bytes, keeping its channel layout.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
    check_dimensions(image)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    let color: ExtendedColorType = image.color().into();
    encoder
        .write_image(image.as_bytes(), image.width(), image.height(), color)
        .map_err(|e| EncodeError::EncodingFailed {
            format: EncodingFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
