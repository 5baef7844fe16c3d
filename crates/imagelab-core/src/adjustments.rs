//! Tonal and color adjustments.
//!
//! ## Operations
//! - Grayscale: single-channel luminance
//! - Contrast: stretch around the mean luminance
//! - Sepia: fixed 3x3 color matrix
//!
//! All functions take the image by value and return the adjusted image.
//! Alpha, where present, is never modified.

use image::{DynamicImage, ImageBuffer, Pixel, Rgb};

/// Contrast factor applied by the `enhance` operation.
pub const CONTRAST_FACTOR: f32 = 1.5;

/// Sepia color matrix, one row per output channel (R', G', B').
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Convert an image to single-channel 8-bit luminance.
///
/// Alpha is dropped.
pub fn grayscale(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageLuma8(other.to_luma8()),
    }
}

/// Increase contrast by `CONTRAST_FACTOR`.
pub fn enhance_contrast(image: DynamicImage) -> DynamicImage {
    adjust_contrast(image, CONTRAST_FACTOR)
}

/// Scale each color channel away from the mean luminance.
///
/// Formula: `output = mid + factor * (input - mid)`, rounded and clamped,
/// where `mid` is the rounded mean luminance of the whole image.
/// A factor of 1.0 is the identity; 0.0 flattens to `mid`.
pub fn adjust_contrast(image: DynamicImage, factor: f32) -> DynamicImage {
    if image.width() == 0 || image.height() == 0 {
        return image;
    }

    let lut = contrast_lut(mean_luminance(&image), factor);

    match image {
        DynamicImage::ImageLuma8(mut buf) => {
            apply_lut(&mut buf, &lut);
            DynamicImage::ImageLuma8(buf)
        }
        DynamicImage::ImageLumaA8(mut buf) => {
            apply_lut(&mut buf, &lut);
            DynamicImage::ImageLumaA8(buf)
        }
        DynamicImage::ImageRgb8(mut buf) => {
            apply_lut(&mut buf, &lut);
            DynamicImage::ImageRgb8(buf)
        }
        DynamicImage::ImageRgba8(mut buf) => {
            apply_lut(&mut buf, &lut);
            DynamicImage::ImageRgba8(buf)
        }
        other => {
            // Decoding normalizes to 8-bit, but stay total for direct callers
            let mut buf = other.to_rgba8();
            apply_lut(&mut buf, &lut);
            DynamicImage::ImageRgba8(buf)
        }
    }
}

/// Rounded mean of the image's 8-bit luminance.
fn mean_luminance(image: &DynamicImage) -> u8 {
    let luma = image.to_luma8();
    let count = luma.pixels().len() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = luma.pixels().map(|p| p[0] as u64).sum();
    ((sum as f64 / count as f64) + 0.5).floor().min(255.0) as u8
}

/// Build the 256-entry lookup table for a contrast stretch.
fn contrast_lut(mid: u8, factor: f32) -> [u8; 256] {
    let mid = mid as f32;
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        let stretched = mid + factor * (value as f32 - mid);
        *slot = stretched.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn apply_lut<P>(buf: &mut ImageBuffer<P, Vec<u8>>, lut: &[u8; 256])
where
    P: Pixel<Subpixel = u8>,
{
    for pixel in buf.pixels_mut() {
        pixel.apply_without_alpha(|v| lut[v as usize]);
    }
}

/// Apply the sepia tone matrix.
///
/// The image is converted to 3-channel RGB first, so alpha is dropped and
/// grayscale input gains color.
pub fn sepia(image: DynamicImage) -> DynamicImage {
    let mut rgb = image.to_rgb8();
    for pixel in rgb.pixels_mut() {
        *pixel = sepia_pixel(*pixel);
    }
    DynamicImage::ImageRgb8(rgb)
}

#[inline]
fn sepia_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = pixel.0.map(|c| c as f32);
    let channel = |row: [f32; 3]| -> u8 {
        (row[0] * r + row[1] * g + row[2] * b).round().min(255.0) as u8
    };
    Rgb([
        channel(SEPIA_MATRIX[0]),
        channel(SEPIA_MATRIX[1]),
        channel(SEPIA_MATRIX[2]),
    ])
}
