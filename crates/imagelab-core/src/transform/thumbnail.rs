//! Bounding-box thumbnails.

use image::DynamicImage;

use crate::decode::{resize_to_fit, FilterType};

/// Edge length of the square box a thumbnail must fit in.
pub const THUMBNAIL_SIZE: u32 = 200;

/// Shrink an image to fit within `THUMBNAIL_SIZE` x `THUMBNAIL_SIZE`.
///
/// The shorter side shrinks proportionally; images that already fit are
/// returned unchanged.
pub fn thumbnail(image: DynamicImage) -> DynamicImage {
    resize_to_fit(image, THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Bicubic)
}
