//! Output encoding formats and color modes.
//!
//! A result image starts out in the format it was uploaded in. Operations that
//! discard color fidelity (grayscale, edge detection, sepia) force the lossy
//! format, since a lossless container would preserve nothing useful.

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

/// Serialization format of a result image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    /// JPEG (lossy).
    Jpeg,
    /// PNG (lossless).
    Png,
}

impl EncodingFormat {
    /// Map a detected container format onto a supported encoding format.
    ///
    /// Returns `None` for anything other than JPEG or PNG.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(EncodingFormat::Jpeg),
            ImageFormat::Png => Some(EncodingFormat::Png),
            _ => None,
        }
    }

    /// MIME type used when the artifact is stored or served.
    pub fn content_type(self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "image/jpeg",
            EncodingFormat::Png => "image/png",
        }
    }

    /// Canonical file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingFormat::Jpeg => write!(f, "jpeg"),
            EncodingFormat::Png => write!(f, "png"),
        }
    }
}

/// Channel layout of an in-memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Single-channel luminance.
    Luma,
    /// Luminance with alpha.
    LumaAlpha,
    /// Three-channel color.
    Rgb,
    /// Three-channel color with alpha.
    Rgba,
}

impl ColorMode {
    /// Color mode of an image. Wide or float variants report their 8-bit
    /// equivalent layout.
    pub fn of(image: &DynamicImage) -> Self {
        let color = image.color();
        match (color.has_color(), color.has_alpha()) {
            (false, false) => ColorMode::Luma,
            (false, true) => ColorMode::LumaAlpha,
            (true, false) => ColorMode::Rgb,
            (true, true) => ColorMode::Rgba,
        }
    }
}
