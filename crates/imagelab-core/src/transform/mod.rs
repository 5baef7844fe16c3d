//! Geometric and spatial-filter operations.
//!
//! Every function here takes the image by value and returns the transformed
//! image, so a pipeline branch that owns its copy never clones needlessly.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Crop rectangles are in whole pixels

mod crop;
mod filter;
mod thumbnail;

pub use crop::{aspect_crop_rect, crop_pad, crop_to_aspect, CropRect, PORTRAIT_ASPECT};
pub use filter::{find_edges, gaussian_blur, BLUR_RADIUS, FIND_EDGES_KERNEL};
pub use thumbnail::{thumbnail, THUMBNAIL_SIZE};
