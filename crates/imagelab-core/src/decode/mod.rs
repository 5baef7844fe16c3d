//! Image decoding for the Image Lab pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG byte streams into upright in-memory images
//! - Bounding decode cost (allocation limit, maximum output dimension)
//! - Aspect-preserving resizing, shared with the `thumbnail` operation
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::config::DecodeConfig;
//! use imagelab_core::decode::decode;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let decoded = decode(&bytes, &DecodeConfig::default()).unwrap();
//! println!("Decoded {}x{} {}", decoded.width(), decoded.height(), decoded.format);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::decode;
pub use resize::{fit_dimensions, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
