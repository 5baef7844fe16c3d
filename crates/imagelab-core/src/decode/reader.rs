//! Byte-stream decoding with EXIF orientation handling and resource bounds.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader, Limits};
use tracing::debug;

use super::resize::resize_to_fit;
use super::{DecodeError, DecodedImage, Orientation};
use crate::config::DecodeConfig;
use crate::format::EncodingFormat;

/// Decode an image from bytes into an upright, 8-bit in-memory image.
///
/// The container format is detected from content, not from a file name. Only
/// JPEG and PNG are accepted. Stored EXIF orientation is applied, so the
/// returned pixels are right-side-up, and the result is shrunk to
/// `config.max_dimension` when it is larger.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognizable image.
/// Returns `DecodeError::UnsupportedFormat` for recognized formats other than JPEG/PNG.
/// Returns `DecodeError::OutOfMemory` if decoding would exceed `config.max_alloc_bytes`.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or malformed.
pub fn decode(bytes: &[u8], config: &DecodeConfig) -> Result<DecodedImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let detected = reader.format().ok_or(DecodeError::InvalidFormat)?;
    let format = EncodingFormat::from_image_format(detected)
        .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{detected:?}").to_lowercase()))?;

    let mut limits = Limits::default();
    limits.max_alloc = Some(config.max_alloc_bytes);
    reader.limits(limits);

    let img = reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => DecodeError::OutOfMemory,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let orientation = extract_orientation(bytes);
    let img = to_8bit(apply_orientation(img, orientation));

    let img = match config.max_dimension {
        Some(max_edge) if img.width() > max_edge || img.height() > max_edge => {
            debug!(
                width = img.width(),
                height = img.height(),
                max_edge,
                "downscaling oversized image after decode"
            );
            resize_to_fit(img, max_edge, max_edge, config.downscale_filter)
        }
        _ => img,
    };

    debug!(
        %format,
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded image"
    );

    Ok(DecodedImage {
        image: img,
        format,
        orientation,
    })
}

/// Read the EXIF orientation tag, `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Collapse wide and float sample types onto their 8-bit layout.
///
/// Every operation works on 8-bit channels, so this runs once at decode time.
fn to_8bit(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => img,
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            DynamicImage::ImageRgb8(img.to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::config::EncodeConfig;

    // Minimal baseline JPEG: 1x1, single channel, no EXIF
    const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    fn encoded(image: &DynamicImage, format: EncodingFormat) -> Vec<u8> {
        encode(image, format, &EncodeConfig::default()).unwrap().bytes
    }

    #[test]
    fn test_decode_valid_jpeg() {
        let result = decode(MINIMAL_JPEG, &DecodeConfig::default());
        assert!(result.is_ok(), "Failed to decode valid JPEG: {:?}", result);

        let decoded = result.unwrap();
        assert_eq!(decoded.width(), 1);
        assert_eq!(decoded.height(), 1);
        assert_eq!(decoded.format, EncodingFormat::Jpeg);
        assert_eq!(decoded.orientation, Orientation::Normal);
    }

    #[test]
    fn test_decode_png_keeps_native_format() {
        let source = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            3,
            image::Rgba([10, 20, 30, 40]),
        ));
        let decoded = decode(&encoded(&source, EncodingFormat::Png), &DecodeConfig::default())
            .unwrap();

        assert_eq!(decoded.format, EncodingFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        // PNG is lossless, so pixels survive unchanged
        assert_eq!(decoded.image.as_bytes(), source.as_bytes());
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode(&[0x00, 0x01, 0x02, 0x03], &DecodeConfig::default());
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode(&[], &DecodeConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let truncated = &MINIMAL_JPEG[0..20];
        let result = decode(truncated, &DecodeConfig::default());
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_unsupported_container() {
        let gif_header = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        let result = decode(gif_header, &DecodeConfig::default());
        match result {
            Err(DecodeError::UnsupportedFormat(name)) => assert_eq!(name, "gif"),
            other => panic!("Expected UnsupportedFormat, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_caps_dimension() {
        let source = DynamicImage::new_rgb8(400, 100);
        let config = DecodeConfig {
            max_dimension: Some(200),
            ..DecodeConfig::default()
        };
        let decoded = decode(&encoded(&source, EncodingFormat::Png), &config).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 50));
    }

    #[test]
    fn test_decode_without_cap_keeps_size() {
        let source = DynamicImage::new_rgb8(400, 100);
        let config = DecodeConfig {
            max_dimension: None,
            ..DecodeConfig::default()
        };
        let decoded = decode(&encoded(&source, EncodingFormat::Png), &config).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 100));
    }

    #[test]
    fn test_decode_alloc_limit() {
        let source = DynamicImage::new_rgb8(64, 64);
        let config = DecodeConfig {
            max_alloc_bytes: 16,
            ..DecodeConfig::default()
        };
        let result = decode(&encoded(&source, EncodingFormat::Png), &config);
        assert!(matches!(result, Err(DecodeError::OutOfMemory)));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        assert_eq!(extract_orientation(MINIMAL_JPEG), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    /// Insert an APP1 Exif segment carrying only an Orientation tag right
    /// after the SOI marker.
    fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let [hi, lo] = orientation.to_be_bytes();
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\x00\x2A"); // big-endian TIFF header
        tiff.extend_from_slice(&8u32.to_be_bytes()); // IFD0 offset
        tiff.extend_from_slice(&1u16.to_be_bytes()); // one entry
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes()); // count
        tiff.extend_from_slice(&[hi, lo, 0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

        let mut payload = b"Exif\x00\x00".to_vec();
        payload.extend_from_slice(&tiff);
        let segment_len = (payload.len() + 2) as u16;

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let source = DynamicImage::new_rgb8(40, 20);
        let bytes = with_exif_orientation(&encoded(&source, EncodingFormat::Jpeg), 6);

        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);

        let decoded = decode(&bytes, &DecodeConfig::default()).unwrap();
        assert_eq!(decoded.orientation, Orientation::Rotate90CW);
        assert_eq!((decoded.width(), decoded.height()), (20, 40));
        assert_eq!(decoded.format, EncodingFormat::Jpeg);
    }

    #[test]
    fn test_decode_applies_exif_flip_keeps_size() {
        // Left half white, right half black; a horizontal flip swaps them
        let source = DynamicImage::ImageRgb8(image::RgbImage::from_fn(40, 20, |x, _| {
            if x < 20 {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        }));
        let bytes = with_exif_orientation(&encoded(&source, EncodingFormat::Jpeg), 2);

        let decoded = decode(&bytes, &DecodeConfig::default()).unwrap();
        assert_eq!(decoded.orientation, Orientation::FlipHorizontal);
        assert_eq!((decoded.width(), decoded.height()), (40, 20));

        let rgb = decoded.image.to_rgb8();
        assert!(rgb.get_pixel(2, 10).0[0] < 60);
        assert!(rgb.get_pixel(37, 10).0[0] > 200);
    }

    fn two_pixel_image() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_apply_orientation_normal() {
        let result = apply_orientation(two_pixel_image(), Orientation::Normal).into_rgb8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate90CW).into_rgb8();
        // Dimensions should swap
        assert_eq!(result.dimensions(), (1, 2));
        // Left pixel ends up on top after a clockwise turn
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate180).into_rgb8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result = apply_orientation(two_pixel_image(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_to_8bit_normalizes_wide_samples() {
        let wide = DynamicImage::new_rgb16(3, 2);
        assert!(matches!(to_8bit(wide), DynamicImage::ImageRgb8(_)));

        let wide_gray = DynamicImage::new_luma16(3, 2);
        assert!(matches!(to_8bit(wide_gray), DynamicImage::ImageLuma8(_)));

        let rgba_float = DynamicImage::new_rgba32f(3, 2);
        assert!(matches!(to_8bit(rgba_float), DynamicImage::ImageRgba8(_)));
    }
}
