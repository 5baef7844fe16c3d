//! Image Lab Core - Image transformation pipeline
//!
//! This crate provides the core functionality for Image Lab: decoding
//! uploads, applying named operations both sequentially and independently,
//! rendering color histograms, and encoding every result.
//!
//! # Module Structure
//!
//! - `operations` - The operation catalog and single-operation executor
//! - `pipeline` - Sequential and independent composition
//! - `histogram` - Channel histograms and chart rendering
//! - `decode` / `encode` / `format` - Byte-level adapters
//! - `processor` - Decode, pipeline, histogram and encode wired together
//! - `config` - TOML configuration
//! - `naming` - Artifact file names
//!
//! # Usage
//!
//! ```ignore
//! use imagelab_core::{Config, ProcessRequest, Processor};
//!
//! let processor = Processor::new(Config::default());
//! let bytes = std::fs::read("photo.jpg")?;
//! let output = processor.process(&bytes, &ProcessRequest::new(&["grayscale", "blur"]))?;
//! std::fs::write("photo_combined.jpg", &output.combined?.bytes)?;
//! ```

pub mod adjustments;
pub mod config;
pub mod decode;
pub mod encode;
pub mod format;
pub mod histogram;
pub mod naming;
pub mod operations;
pub mod pipeline;
pub mod processor;
pub mod transform;

pub use config::{Config, ConfigError};
pub use decode::{DecodeError, DecodedImage};
pub use encode::{EncodeError, EncodedImage};
pub use format::{ColorMode, EncodingFormat};
pub use histogram::Histogram;
pub use operations::{parse_operations, OperationId, UnknownOperation};
pub use pipeline::{PipelineResult, Variant};
pub use processor::{
    HistogramOutput, HistogramTitles, ProcessError, ProcessOutput, ProcessRequest, Processor,
};
