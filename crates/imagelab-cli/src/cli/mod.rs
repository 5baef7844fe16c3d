//! Command handlers.

pub mod histogram;
pub mod operations;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Context;
use imagelab_core::Config;

/// Load the configuration file if one was given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

pub(crate) fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagelab.toml");
        std::fs::write(&path, "[encode]\njpeg_quality = 70\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.encode.jpeg_quality, 70);
    }

    #[test]
    fn test_load_config_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagelab.toml");
        std::fs::write(&path, "[encode]\njpeg_quality = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_read_input_missing() {
        let err = read_input(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
