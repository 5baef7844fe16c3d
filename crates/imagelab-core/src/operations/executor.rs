//! Applies a single named operation to an in-memory image.

use image::DynamicImage;
use tracing::{debug, warn};

use super::lookup;
use crate::format::EncodingFormat;

/// Outcome of applying one operation.
#[derive(Debug, Clone)]
pub enum Applied {
    /// The operation ran; `format` is the format the result should be
    /// encoded in.
    Transformed {
        image: DynamicImage,
        format: EncodingFormat,
    },
    /// The name matched no catalog entry. The input image is handed back
    /// untouched.
    Skipped { image: DynamicImage },
}

/// Apply the operation named `name` to `image`.
///
/// Unknown names are logged at warn level and skipped; they never fail the
/// caller. For known names the color precondition is satisfied first, then
/// the transform runs and the format policy decides the output format.
pub fn apply(image: DynamicImage, name: &str, current_format: EncodingFormat) -> Applied {
    let Some(def) = lookup(name) else {
        warn!(operation = name, "unknown operation, skipping");
        return Applied::Skipped { image };
    };

    let prepared = def.precondition.prepare(image);
    let image = (def.transform)(prepared);
    let format = def.format_policy.resolve(current_format);

    debug!(
        operation = %def.id,
        width = image.width(),
        height = image.height(),
        %format,
        "applied operation"
    );

    Applied::Transformed { image, format }
}
