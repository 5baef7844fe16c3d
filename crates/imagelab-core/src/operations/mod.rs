//! The operation catalog.
//!
//! Every supported transformation is a row in a static table mapping its
//! stable identifier to the transform function, the output-format policy and
//! the color mode the transform expects. There is no runtime registration:
//! adding an operation means adding an `OperationId` variant and a row.
//!
//! | id          | effect                                | output format |
//! |-------------|---------------------------------------|---------------|
//! | `grayscale` | single-channel luminance              | JPEG          |
//! | `thumbnail` | fit within 200x200                    | unchanged     |
//! | `blur`      | Gaussian blur, radius 5               | unchanged     |
//! | `edges`     | 3x3 find-edges kernel on luminance    | JPEG          |
//! | `enhance`   | contrast x1.5 around mean luminance   | unchanged     |
//! | `sepia`     | sepia color matrix                    | JPEG          |
//! | `crop_pad`  | centered 9:16 crop                    | unchanged     |

pub mod executor;

use std::fmt;
use std::str::FromStr;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments::{enhance_contrast, grayscale, sepia};
use crate::format::EncodingFormat;
use crate::transform::{crop_pad, find_edges, gaussian_blur, thumbnail};

pub use executor::{apply, Applied};

/// Returned when a string does not name a catalog operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operation: '{0}'")]
pub struct UnknownOperation(pub String);

/// Stable identifier of a catalog operation.
///
/// Ordering follows declaration order, which is also the catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    Grayscale,
    Thumbnail,
    Blur,
    Edges,
    Enhance,
    Sepia,
    CropPad,
}

impl OperationId {
    /// All operations, in catalog order.
    pub const ALL: [OperationId; 7] = [
        OperationId::Grayscale,
        OperationId::Thumbnail,
        OperationId::Blur,
        OperationId::Edges,
        OperationId::Enhance,
        OperationId::Sepia,
        OperationId::CropPad,
    ];

    /// The identifier as accepted on input and used in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationId::Grayscale => "grayscale",
            OperationId::Thumbnail => "thumbnail",
            OperationId::Blur => "blur",
            OperationId::Edges => "edges",
            OperationId::Enhance => "enhance",
            OperationId::Sepia => "sepia",
            OperationId::CropPad => "crop_pad",
        }
    }

    /// Human-readable label for listings.
    pub fn label(self) -> &'static str {
        self.def().label
    }

    /// The catalog row for this operation.
    pub fn def(self) -> &'static OperationDef {
        // CATALOG is indexed in declaration order
        &CATALOG[self as usize]
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationId {
    type Err = UnknownOperation;

    /// Exact, case-sensitive match on the stable identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// How an operation affects the output encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Keep whatever format the image currently has.
    Preserve,
    /// Switch to the given format.
    Force(EncodingFormat),
}

impl FormatPolicy {
    /// Resolve the format after the operation.
    pub fn resolve(self, current: EncodingFormat) -> EncodingFormat {
        match self {
            FormatPolicy::Preserve => current,
            FormatPolicy::Force(format) => format,
        }
    }
}

/// Color mode an operation's transform expects on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPrecondition {
    /// Any 8-bit mode.
    None,
    /// Single-channel luminance.
    Luma,
    /// Three-channel RGB.
    Rgb,
}

impl ColorPrecondition {
    /// Convert the image so it satisfies the precondition.
    pub fn prepare(self, image: DynamicImage) -> DynamicImage {
        match (self, image) {
            (ColorPrecondition::Luma, img @ DynamicImage::ImageLuma8(_)) => img,
            (ColorPrecondition::Luma, img) => DynamicImage::ImageLuma8(img.to_luma8()),
            (ColorPrecondition::Rgb, img @ DynamicImage::ImageRgb8(_)) => img,
            (ColorPrecondition::Rgb, img) => DynamicImage::ImageRgb8(img.to_rgb8()),
            (ColorPrecondition::None, img) => img,
        }
    }
}

/// A catalog row.
#[derive(Debug)]
pub struct OperationDef {
    pub id: OperationId,
    pub label: &'static str,
    pub transform: fn(DynamicImage) -> DynamicImage,
    pub format_policy: FormatPolicy,
    pub precondition: ColorPrecondition,
}

/// The static operation table, in `OperationId` declaration order.
pub static CATALOG: [OperationDef; 7] = [
    OperationDef {
        id: OperationId::Grayscale,
        label: "Grayscale",
        transform: grayscale,
        format_policy: FormatPolicy::Force(EncodingFormat::Jpeg),
        precondition: ColorPrecondition::None,
    },
    OperationDef {
        id: OperationId::Thumbnail,
        label: "Thumbnail (200px)",
        transform: thumbnail,
        format_policy: FormatPolicy::Preserve,
        precondition: ColorPrecondition::None,
    },
    OperationDef {
        id: OperationId::Blur,
        label: "Apply Blur",
        transform: gaussian_blur,
        format_policy: FormatPolicy::Preserve,
        precondition: ColorPrecondition::None,
    },
    OperationDef {
        id: OperationId::Edges,
        label: "Find Edges",
        transform: find_edges,
        format_policy: FormatPolicy::Force(EncodingFormat::Jpeg),
        precondition: ColorPrecondition::Luma,
    },
    OperationDef {
        id: OperationId::Enhance,
        label: "Enhance Contrast (+1.5)",
        transform: enhance_contrast,
        format_policy: FormatPolicy::Preserve,
        precondition: ColorPrecondition::None,
    },
    OperationDef {
        id: OperationId::Sepia,
        label: "Sepia Tone",
        transform: sepia,
        format_policy: FormatPolicy::Force(EncodingFormat::Jpeg),
        precondition: ColorPrecondition::Rgb,
    },
    OperationDef {
        id: OperationId::CropPad,
        label: "Crop to 9:16",
        transform: crop_pad,
        format_policy: FormatPolicy::Preserve,
        precondition: ColorPrecondition::None,
    },
];

/// Look up an operation by its stable identifier.
pub fn lookup(name: &str) -> Option<&'static OperationDef> {
    name.parse::<OperationId>().ok().map(OperationId::def)
}

/// Split a comma-separated operation list.
///
/// Entries are trimmed and empty entries dropped. Names are not validated
/// here; unknown names are skipped later by the executor.
pub fn parse_operations(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
