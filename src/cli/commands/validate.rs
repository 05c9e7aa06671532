//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the OLI configuration file and the recognizer catalog it points to.

use super::load_config_or_default;
use crate::anonymization::AnalyzerEngine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Building the engine compiles every recognizer pattern
        let engine = match AnalyzerEngine::new(config.analyzer.clone()) {
            Ok(engine) => {
                println!("✅ Configuration is valid");
                engine
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        let analyzer = &config.analyzer;
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Languages: {}", analyzer.languages.join(", "));
        println!("  Score Threshold: {}", analyzer.score_threshold);
        println!(
            "  Recognizer Library: {}",
            analyzer
                .recognizer_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!("  Recognizers: {}", engine.catalog().len());
        println!("  Detector: {}", engine.detector_name());
        println!(
            "  Context Window: {} chars (+{})",
            analyzer.context.window_chars, analyzer.context.boost
        );
        println!("  Custom Operators: {}", analyzer.custom_operators.len());
        if analyzer.audit.enabled {
            println!("  Audit Log: {}", analyzer.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_config() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[analyzer]\nscore_threshold = 0.6\n").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_config() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[analyzer]\nlanguages = [\"de\"]\n").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
