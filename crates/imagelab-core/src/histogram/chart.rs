//! Raster rendering of a histogram as a line chart.
//!
//! ## Layout
//!
//! ```text
//!  0                                                           600
//!  +-------------------------------------------------------------+ 0
//!  |                          title                              |
//!  |   max +----------------------------------------------+      | 36
//!  |       |   red, green, blue polylines (512 x 200)     |      |
//!  |     0 +----------------------------------------------+      | 236
//!  |        0                 128                      255       |
//!  |                     Pixel intensity                         |
//!  +-------------------------------------------------------------+ 300
//! ```
//!
//! Bin `i` is plotted at `x = MARGIN_LEFT + 2i`. All three channels share
//! one vertical scale so their heights stay comparable.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{DynamicImage, Rgb, RgbImage};

use super::{compute, Histogram};

pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 300;

pub const MARGIN_LEFT: u32 = 64;
pub const MARGIN_RIGHT: u32 = 24;
pub const MARGIN_TOP: u32 = 36;
pub const MARGIN_BOTTOM: u32 = 64;

/// Width of the plotting area: two pixels per bin.
pub const GRAPH_WIDTH: u32 = CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
/// Height of the plotting area; the tallest bin reaches exactly this high.
pub const GRAPH_HEIGHT: u32 = CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const BIN_STEP: u32 = GRAPH_WIDTH / 256;

/// Title used when the caller has none.
pub const DEFAULT_TITLE: &str = "Color Histogram";

const BACKGROUND: Rgb<u8> = Rgb([31, 41, 55]);
const RED_LINE: Rgb<u8> = Rgb([255, 80, 80]);
const GREEN_LINE: Rgb<u8> = Rgb([80, 255, 80]);
const BLUE_LINE: Rgb<u8> = Rgb([80, 80, 255]);
const TEXT_COLOR: Rgb<u8> = Rgb([200, 200, 200]);
const AXIS_COLOR: Rgb<u8> = Rgb([107, 114, 128]);

const GLYPH_SIZE: i32 = 8;

/// Horizontal pixel position of a bin.
pub const fn bin_x(bin: usize) -> u32 {
    MARGIN_LEFT + bin as u32 * BIN_STEP
}

/// Row a zero count is plotted on.
pub const fn floor_y() -> u32 {
    MARGIN_TOP + GRAPH_HEIGHT
}

/// Pixels per count. Zero for an empty histogram, which flattens every
/// channel onto the floor.
pub fn vertical_scale(max_count: u32) -> f32 {
    if max_count == 0 {
        0.0
    } else {
        GRAPH_HEIGHT as f32 / max_count as f32
    }
}

fn bin_y(count: u32, scale: f32) -> i32 {
    floor_y() as i32 - (count as f32 * scale).round() as i32
}

/// Render a histogram chart for an image.
///
/// The image is analysed on an RGB copy, sampled down to `max_pixels`.
pub fn render(image: &DynamicImage, title: &str, max_pixels: u64) -> RgbImage {
    render_chart(&compute(image, max_pixels), title)
}

/// Render an already computed histogram.
pub fn render_chart(hist: &Histogram, title: &str) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
    let max_count = hist.max_value();
    let scale = vertical_scale(max_count);

    draw_axes(&mut canvas);

    for (bins, color) in [
        (&hist.red, RED_LINE),
        (&hist.green, GREEN_LINE),
        (&hist.blue, BLUE_LINE),
    ] {
        draw_polyline(&mut canvas, bins, scale, color);
    }

    draw_labels(&mut canvas, max_count);

    let title = if title.is_empty() { DEFAULT_TITLE } else { title };
    let title_x = (CANVAS_WIDTH as i32 - text_width(title)) / 2;
    draw_text(&mut canvas, title_x, (MARGIN_TOP as i32 - GLYPH_SIZE) / 2, title, TEXT_COLOR);

    canvas
}

fn draw_polyline(canvas: &mut RgbImage, bins: &[u32; 256], scale: f32, color: Rgb<u8>) {
    for (i, pair) in bins.windows(2).enumerate() {
        let from = (bin_x(i) as i32, bin_y(pair[0], scale));
        let to = (bin_x(i + 1) as i32, bin_y(pair[1], scale));
        draw_line(canvas, from, to, color);
    }
}

fn draw_axes(canvas: &mut RgbImage) {
    let left = MARGIN_LEFT as i32 - 1;
    let bottom = floor_y() as i32 + 1;
    let right = bin_x(255) as i32;

    draw_line(canvas, (left, bottom), (right, bottom), AXIS_COLOR);
    draw_line(canvas, (left, MARGIN_TOP as i32), (left, bottom), AXIS_COLOR);

    for bin in [0, 128, 255] {
        let x = bin_x(bin) as i32;
        draw_line(canvas, (x, bottom + 1), (x, bottom + 3), AXIS_COLOR);
    }
}

fn draw_labels(canvas: &mut RgbImage, max_count: u32) {
    let below_axis = floor_y() as i32 + 8;
    for bin in [0usize, 128, 255] {
        let label = bin.to_string();
        let x = bin_x(bin) as i32 - text_width(&label) / 2;
        draw_text(canvas, x, below_axis, &label, TEXT_COLOR);
    }

    let caption = "Pixel intensity";
    let caption_x = MARGIN_LEFT as i32 + (GRAPH_WIDTH as i32 - text_width(caption)) / 2;
    draw_text(canvas, caption_x, below_axis + 20, caption, TEXT_COLOR);

    // Y axis: right-aligned against the axis line
    let right_edge = MARGIN_LEFT as i32 - 6;
    let zero = "0";
    draw_text(
        canvas,
        right_edge - text_width(zero),
        floor_y() as i32 - GLYPH_SIZE / 2,
        zero,
        TEXT_COLOR,
    );
    let max_label = max_count.to_string();
    draw_text(
        canvas,
        right_edge - text_width(&max_label),
        MARGIN_TOP as i32 - GLYPH_SIZE / 2,
        &max_label,
        TEXT_COLOR,
    );
}

/// Set a pixel, ignoring coordinates outside the canvas.
#[inline]
fn put(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line, both endpoints included.
fn draw_line(canvas: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += step_x;
        }
        if doubled <= dx {
            err += dx;
            y += step_y;
        }
    }
}

fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_SIZE
}

/// Draw text with the 8x8 bitmap font. Characters the font lacks render
/// as `?`.
fn draw_text(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if (bits >> col) & 1 == 1 {
                    put(canvas, cursor_x + col, y + row as i32, color);
                }
            }
        }
        cursor_x += GLYPH_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::compute_histogram;

    fn count_color(canvas: &RgbImage, color: Rgb<u8>) -> usize {
        canvas.pixels().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(GRAPH_WIDTH, 512);
        assert_eq!(GRAPH_HEIGHT, 200);
        assert_eq!(floor_y(), 236);
        assert_eq!(bin_x(0), 64);
        assert_eq!(bin_x(255), 574);
        assert!(bin_x(255) < CANVAS_WIDTH - MARGIN_RIGHT);
    }

    #[test]
    fn test_vertical_scale() {
        assert_eq!(vertical_scale(0), 0.0);
        assert_eq!(vertical_scale(1), 200.0);
        assert_eq!(vertical_scale(400), 0.5);
    }

    #[test]
    fn test_canvas_size_and_background() {
        let chart = render_chart(&Histogram::new(), "Empty");
        assert_eq!(chart.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(chart.get_pixel(CANVAS_WIDTH - 1, CANVAS_HEIGHT - 1), &BACKGROUND);
    }

    #[test]
    fn test_single_red_pixel_peaks_at_full_height() {
        let hist = compute_histogram(&[255, 0, 0], 1, 1);
        assert_eq!(hist.red[255], 1);
        assert_eq!(vertical_scale(hist.max_value()), 200.0);

        let chart = render_chart(&hist, "Red");
        // Full graph height above the floor
        assert_eq!(chart.get_pixel(bin_x(255), MARGIN_TOP), &RED_LINE);
    }

    #[test]
    fn test_empty_histogram_is_flat_on_floor() {
        let chart = render_chart(&Histogram::new(), "Empty");
        // Blue is drawn last, so the shared floor line ends up blue
        for bin in [0, 1, 100, 200, 255] {
            assert_eq!(chart.get_pixel(bin_x(bin), floor_y()), &BLUE_LINE, "bin {bin}");
        }
        // Nothing is plotted above the floor
        for y in MARGIN_TOP..floor_y() {
            assert_ne!(chart.get_pixel(bin_x(128), y), &BLUE_LINE);
        }
    }

    #[test]
    fn test_all_three_channels_visible() {
        // Distinct peaks per channel so no line fully covers another
        let mut hist = Histogram::new();
        hist.red[50] = 10;
        hist.green[150] = 10;
        hist.blue[250] = 10;
        let chart = render_chart(&hist, "Peaks");
        assert!(count_color(&chart, RED_LINE) > 0);
        assert!(count_color(&chart, GREEN_LINE) > 0);
        assert!(count_color(&chart, BLUE_LINE) > 0);
        assert_eq!(chart.get_pixel(bin_x(50), MARGIN_TOP), &RED_LINE);
        assert_eq!(chart.get_pixel(bin_x(150), MARGIN_TOP), &GREEN_LINE);
    }

    fn title_band(canvas: &RgbImage) -> Vec<Rgb<u8>> {
        let top = (MARGIN_TOP - GLYPH_SIZE as u32) / 2;
        (top..top + GLYPH_SIZE as u32)
            .flat_map(|y| (0..CANVAS_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| *canvas.get_pixel(x, y))
            .collect()
    }

    #[test]
    fn test_title_is_drawn() {
        let chart = render_chart(&Histogram::new(), "Original Image");
        assert!(title_band(&chart).contains(&TEXT_COLOR));

        let other = render_chart(&Histogram::new(), "Processed Image");
        assert_ne!(title_band(&chart), title_band(&other));
    }

    #[test]
    fn test_empty_title_uses_default() {
        let blank = render_chart(&Histogram::new(), "");
        let default = render_chart(&Histogram::new(), DEFAULT_TITLE);
        assert_eq!(blank, default);
    }

    #[test]
    fn test_unsupported_characters_do_not_fault() {
        let chart = render_chart(&Histogram::new(), "Histogramm \u{1F600} \u{4E2D}");
        assert_eq!(chart.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn test_overlong_title_is_clipped() {
        let title = "x".repeat(500);
        let chart = render_chart(&Histogram::new(), &title);
        assert_eq!(chart.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn test_render_from_image() {
        let image = DynamicImage::new_rgb8(16, 16);
        let chart = render(&image, "Black", 1_000_000);
        // Every pixel is black: one spike at bin 0 for all three channels
        assert_eq!(chart.get_pixel(bin_x(0), MARGIN_TOP), &BLUE_LINE);
        assert_eq!(chart.get_pixel(bin_x(1), floor_y()), &BLUE_LINE);
    }

    #[test]
    fn test_line_includes_endpoints() {
        let mut canvas = RgbImage::from_pixel(10, 10, BACKGROUND);
        draw_line(&mut canvas, (1, 8), (7, 2), RED_LINE);
        assert_eq!(canvas.get_pixel(1, 8), &RED_LINE);
        assert_eq!(canvas.get_pixel(7, 2), &RED_LINE);
    }

    #[test]
    fn test_line_clips_off_canvas() {
        let mut canvas = RgbImage::from_pixel(4, 4, BACKGROUND);
        draw_line(&mut canvas, (-5, -5), (10, 10), RED_LINE);
        assert_eq!(canvas.get_pixel(0, 0), &RED_LINE);
        assert_eq!(canvas.get_pixel(3, 3), &RED_LINE);
    }
}
