//! Spatial filters: Gaussian blur and edge detection.

use image::DynamicImage;

/// Standard deviation of the `blur` operation, in pixels.
pub const BLUR_RADIUS: f32 = 5.0;

/// 3x3 Laplacian-style kernel used by `find_edges`.
///
/// Weights sum to zero, so uniform regions map to black.
pub const FIND_EDGES_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Apply a Gaussian blur of `BLUR_RADIUS` to every channel.
///
/// Dimensions and color mode are unchanged.
pub fn gaussian_blur(image: DynamicImage) -> DynamicImage {
    image.blur(BLUR_RADIUS)
}

/// Detect edges on the luminance channel.
///
/// The input is converted to 8-bit luminance first, then convolved with
/// `FIND_EDGES_KERNEL`. Responses are clamped to 0..=255. The result is
/// always single-channel.
pub fn find_edges(image: DynamicImage) -> DynamicImage {
    let luma = match image {
        DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageLuma8(other.to_luma8()),
    };

    if luma.width() == 0 || luma.height() == 0 {
        return luma;
    }

    luma.filter3x3(&FIND_EDGES_KERNEL)
}
