//! Centered aspect-ratio cropping.
//!
//! `crop_pad` produces a 9:16 portrait frame by trimming whichever dimension
//! is in excess, symmetrically. Nothing is padded: the name is kept because it
//! is the stable operation identifier.
//!
//! # Example
//!
//! ```ignore
//! // A 1000x1000 square becomes a 562x1000 portrait strip
//! let portrait = crop_pad(square);
//! assert_eq!(portrait.width(), 562);
//! ```

use image::DynamicImage;

/// Target aspect ratio of `crop_pad`, as (width, height).
pub const PORTRAIT_ASPECT: (u32, u32) = (9, 16);

/// A crop region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the largest centered region of `width` x `height` with the aspect
/// ratio `ratio_w:ratio_h`.
///
/// When the source is wider than the target ratio the width is cropped,
/// otherwise the height is. The cropped dimension is floored and never
/// drops below 1 pixel.
pub fn aspect_crop_rect(width: u32, height: u32, ratio_w: u32, ratio_h: u32) -> CropRect {
    if width == 0 || height == 0 {
        return CropRect {
            left: 0,
            top: 0,
            width,
            height,
        };
    }

    let (w, h) = (width as u64, height as u64);
    let (rw, rh) = (ratio_w.max(1) as u64, ratio_h.max(1) as u64);

    if w * rh > h * rw {
        // Too wide: crop width symmetrically
        let new_width = ((h * rw / rh) as u32).clamp(1, width);
        CropRect {
            left: (width - new_width) / 2,
            top: 0,
            width: new_width,
            height,
        }
    } else {
        // Too tall (or exact): crop height symmetrically
        let new_height = ((w * rh / rw).min(h) as u32).max(1);
        CropRect {
            left: 0,
            top: (height - new_height) / 2,
            width,
            height: new_height,
        }
    }
}

/// Crop an image to the given aspect ratio, keeping the center.
pub fn crop_to_aspect(image: DynamicImage, ratio_w: u32, ratio_h: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return image;
    }

    let rect = aspect_crop_rect(width, height, ratio_w, ratio_h);

    // Fast path: already at the target ratio
    if rect.width == width && rect.height == height {
        return image;
    }

    image.crop_imm(rect.left, rect.top, rect.width, rect.height)
}

/// Crop an image to a centered 9:16 portrait frame.
pub fn crop_pad(image: DynamicImage) -> DynamicImage {
    let (ratio_w, ratio_h) = PORTRAIT_ASPECT;
    crop_to_aspect(image, ratio_w, ratio_h)
}
