//! CLI command implementations
//!
//! This module contains all CLI command implementations and the helpers
//! they share for loading configuration and reading input documents.

pub mod anonymize;
pub mod detect;
pub mod entities;
pub mod init;
pub mod validate;

use crate::anonymization::{AnalyzerEngine, Language};
use crate::config::{load_config, load_config_str, OliConfig};
use crate::domain::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "oli.toml";

/// Source name used for standard input
pub const STDIN_SOURCE: &str = "<stdin>";

/// Load the configuration file, falling back to defaults
///
/// A missing file is only tolerated for the default path; defaults still
/// receive `OLI_*` environment overrides.
pub fn load_config_or_default(config_path: &str) -> Result<OliConfig> {
    if config_path == DEFAULT_CONFIG_PATH && !Path::new(config_path).exists() {
        tracing::debug!("No configuration file found, using defaults");
        return load_config_str("");
    }
    load_config(config_path)
}

/// Load configuration and build the engine
///
/// Prints the failure and returns the configuration exit code on error.
pub fn build_engine(config_path: &str) -> std::result::Result<AnalyzerEngine, i32> {
    let config = load_config_or_default(config_path).map_err(|e| {
        eprintln!("❌ Failed to load configuration: {e}");
        2 // Configuration error exit code
    })?;

    AnalyzerEngine::new(config.analyzer).map_err(|e| {
        eprintln!("❌ Failed to initialize analyzer: {e}");
        2 // Configuration error exit code
    })
}

/// Parse a `--language` value
pub fn parse_language(value: &str) -> std::result::Result<Language, String> {
    value.parse()
}

/// Read every input file, or standard input when `files` is empty
pub async fn read_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read standard input")?;
        return Ok(vec![(STDIN_SOURCE.to_string(), text)]);
    }

    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        inputs.push((path.display().to_string(), text));
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("fr").unwrap(), Language::French);
        assert!(parse_language("de").is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        assert!(load_config_or_default("/nonexistent/oli.toml").is_err());
    }

    #[tokio::test]
    async fn test_read_inputs_from_files() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "NAS : 123-456-789").unwrap();

        let inputs = read_inputs(&[file.path().to_path_buf()]).await.unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].1, "NAS : 123-456-789");
    }

    #[tokio::test]
    async fn test_read_inputs_missing_file() {
        let result = read_inputs(&[PathBuf::from("/nonexistent/input.txt")]).await;
        assert!(result.is_err());
    }
}
