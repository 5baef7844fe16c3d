//! Configuration for decoding, encoding and histogram analysis.
//!
//! Every section implements `Default`, and `#[serde(default)]` lets a TOML
//! file override only the values it names:
//!
//! ```toml
//! [decode]
//! max_dimension = 2048
//!
//! [encode]
//! jpeg_quality = 85
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decode limits
    pub decode: DecodeConfig,

    /// Encoder settings
    pub encode: EncodeConfig,

    /// Histogram analysis settings
    pub histogram: HistogramConfig,
}

/// Bounds on decode cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Longest edge kept after decode; larger images are downscaled.
    /// `None` keeps the full resolution.
    pub max_dimension: Option<u32>,

    /// Upper bound on decoder allocations, in bytes.
    pub max_alloc_bytes: u64,

    /// Filter used when downscaling to `max_dimension`.
    pub downscale_filter: FilterType,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_dimension: Some(4096),
            max_alloc_bytes: 512 * 1024 * 1024,
            downscale_filter: FilterType::Lanczos3,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Histogram analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Images with more pixels than this are sampled down before binning.
    pub max_pixels: u64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            max_pixels: 1_000_000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are within their supported ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.encode.jpeg_quality) {
            return Err(ConfigError::Validation(format!(
                "encode.jpeg_quality must be between 1 and 100, got {}",
                self.encode.jpeg_quality
            )));
        }
        if self.decode.max_dimension == Some(0) {
            return Err(ConfigError::Validation(
                "decode.max_dimension must be greater than 0".to_string(),
            ));
        }
        if self.decode.max_alloc_bytes == 0 {
            return Err(ConfigError::Validation(
                "decode.max_alloc_bytes must be greater than 0".to_string(),
            ));
        }
        if self.histogram.max_pixels == 0 {
            return Err(ConfigError::Validation(
                "histogram.max_pixels must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decode.max_dimension, Some(4096));
        assert_eq!(config.encode.jpeg_quality, 90);
        assert_eq!(config.histogram.max_pixels, 1_000_000);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            [decode]
            max_dimension = 2048
            downscale_filter = "bicubic"

            [encode]
            jpeg_quality = 75
            "#,
        )
        .unwrap();

        assert_eq!(config.decode.max_dimension, Some(2048));
        assert_eq!(config.decode.downscale_filter, FilterType::Bicubic);
        assert_eq!(config.decode.max_alloc_bytes, DecodeConfig::default().max_alloc_bytes);
        assert_eq!(config.encode.jpeg_quality, 75);
        assert_eq!(config.histogram, HistogramConfig::default());
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let result = Config::from_toml_str("[encode]\njpeg_quality = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_max_dimension_rejected() {
        let result = Config::from_toml_str("[decode]\nmax_dimension = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_histogram_budget_rejected() {
        let result = Config::from_toml_str("[histogram]\nmax_pixels = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml_str("[decode\nmax_dimension = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagelab.toml");
        std::fs::write(&path, "[histogram]\nmax_pixels = 5000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.histogram.max_pixels, 5000);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load_from(Path::new("/nonexistent/imagelab.toml"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
