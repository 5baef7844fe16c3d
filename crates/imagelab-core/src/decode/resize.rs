//! Aspect-preserving resizing.
//!
//! Shared by the decode-time dimension cap and the `thumbnail` operation.
//! Images are only ever shrunk; a source that already fits is returned as is.

use image::DynamicImage;

use super::FilterType;

/// Resize an image so it fits within `max_width` x `max_height`.
///
/// Aspect ratio is preserved and the image is never upscaled. Takes the image
/// by value so that an image that already fits is handed back without a copy.
///
/// # Arguments
///
/// * `image` - The source image
/// * `max_width` - Width of the bounding box in pixels
/// * `max_height` - Height of the bounding box in pixels
/// * `filter` - Interpolation filter to use
pub fn resize_to_fit(
    image: DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let (new_width, new_height) = fit_dimensions(width, height, max_width, max_height);

    if new_width == width && new_height == height {
        return image;
    }

    image.resize_exact(new_width, new_height, filter.to_image_filter())
}

/// Calculate dimensions that fit within a bounding box while preserving aspect ratio.
///
/// Returns the input dimensions unchanged when they already fit, or when any
/// input is zero.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (width, height);
    }

    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (new_width, new_height)
}
