//! Configuration management for OLI.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! OLI uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `OLI_*` environment variable overrides
//! - Default values for every setting
//! - Validation before the engine is built
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use oli::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("oli.toml")?;
//!
//! println!("Languages: {:?}", config.analyzer.languages);
//! println!("Threshold: {}", config.analyzer.score_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnalyzerConfig`] - Languages, threshold, replacement tokens,
//!   recognizer library, context scoring and audit trail
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [analyzer]
//! languages = ["en", "fr"]
//! score_threshold = 0.7
//!
//! [analyzer.custom_operators]
//! CA_SIN = "<NAS>"
//!
//! [analyzer.audit]
//! enabled = true
//! log_path = "${OLI_AUDIT_DIR}/anonymization.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::{AnalyzerConfig, AuditConfig, ContextConfig};
pub use loader::{load_config, load_config_str};
pub use schema::{ApplicationConfig, LoggingConfig, OliConfig};
