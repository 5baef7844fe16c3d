//! Histogram computation and chart rendering.
//!
//! Counts per-channel intensity distributions (256 bins each for red, green
//! and blue) and renders them as an annotated line chart. Analysis always
//! runs on an RGB working copy, so grayscale sources produce three identical
//! channels and the caller's image is never touched.
//!
//! Large images are sampled down with nearest-neighbour sampling before
//! binning. Sampling keeps existing pixel values, so the shape of the
//! distribution survives while the counts shrink.

mod chart;

pub use chart::{
    bin_x, floor_y, render, render_chart, vertical_scale, CANVAS_HEIGHT, CANVAS_WIDTH,
    DEFAULT_TITLE, GRAPH_HEIGHT, GRAPH_WIDTH, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT,
    MARGIN_TOP,
};

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// Per-channel intensity counts for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel histogram (256 bins)
    pub red: [u32; 256],
    /// Green channel histogram (256 bins)
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins)
    pub blue: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the maximum value across all channels for normalization
    pub fn max_value(&self) -> u32 {
        let max_r = self.red.iter().copied().max().unwrap_or(0);
        let max_g = self.green.iter().copied().max().unwrap_or(0);
        let max_b = self.blue.iter().copied().max().unwrap_or(0);
        max_r.max(max_g).max(max_b)
    }

    /// Number of pixels that were binned.
    pub fn pixel_count(&self) -> u64 {
        self.red.iter().map(|&count| count as u64).sum()
    }
}

/// Compute RGB histograms from pixel data.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// At most `width * height` pixels are binned. A buffer shorter than that
/// contributes only its complete RGB triples.
///
/// # Example
/// ```ignore
/// use imagelab_core::histogram::compute_histogram;
///
/// let pixels = vec![255, 0, 0, 0, 255, 0]; // Red, Green pixels
/// let hist = compute_histogram(&pixels, 2, 1);
/// assert_eq!(hist.red[255], 1);
/// assert_eq!(hist.green[255], 1);
/// ```
///
/// # Performance
/// Single pass, O(n) in the number of pixels. Memory usage is constant
/// (3KB for bins).
pub fn compute_histogram(pixels: &[u8], width: u32, height: u32) -> Histogram {
    let mut hist = Histogram::new();

    let expected_len = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(3);
    let usable = expected_len.min(pixels.len());

    for chunk in pixels[..usable].chunks_exact(3) {
        hist.red[chunk[0] as usize] += 1;
        hist.green[chunk[1] as usize] += 1;
        hist.blue[chunk[2] as usize] += 1;
    }

    hist
}

/// Compute the histogram of an image of any color mode.
///
/// Images with more than `max_pixels` pixels are sampled down first.
pub fn compute(image: &DynamicImage, max_pixels: u64) -> Histogram {
    let (width, height) = (image.width(), image.height());
    let (sample_w, sample_h) = sample_dimensions(width, height, max_pixels);

    let rgb = if (sample_w, sample_h) == (width, height) {
        image.to_rgb8()
    } else {
        debug!(width, height, sample_w, sample_h, "sampling image for histogram");
        image
            .resize_exact(sample_w, sample_h, FilterType::Nearest)
            .into_rgb8()
    };

    compute_histogram(rgb.as_raw(), rgb.width(), rgb.height())
}

/// Dimensions to sample an image down to so it holds at most `max_pixels`.
///
/// Returns the input unchanged when it is already within budget. Aspect ratio
/// is kept as far as the budget allows; neither side drops below 1.
pub fn sample_dimensions(width: u32, height: u32, max_pixels: u64) -> (u32, u32) {
    let total = width as u64 * height as u64;
    if total == 0 || total <= max_pixels {
        return (width, height);
    }

    let budget = max_pixels.max(1);
    let scale = (budget as f64 / total as f64).sqrt();
    let widest = budget.min(width as u64) as u32;
    let sample_w = ((width as f64 * scale).floor() as u32).clamp(1, widest);
    let by_aspect = ((height as f64 * scale).floor() as u32).max(1);
    let by_budget = (budget / sample_w as u64).max(1).min(height as u64) as u32;
    (sample_w, by_aspect.min(by_budget).min(height))
}
