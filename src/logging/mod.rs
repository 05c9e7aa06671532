//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Local JSON file logging with rotation
//!
//! Matched PII text is never passed to the logging macros; entity types,
//! offsets and counts are.
//!
//! # Example
//!
//! ```no_run
//! use oli::logging::init_logging;
//! use oli::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of one document analysis
///
/// # Example
///
/// ```no_run
/// use oli::log_document_result;
/// use oli::anonymization::{AnalyzerConfig, AnalyzerEngine};
///
/// let engine = AnalyzerEngine::new(AnalyzerConfig::default()).unwrap();
/// let result = engine.analyze("NAS : 123-456-789", None);
/// log_document_result!("notes.txt", &result);
/// ```
#[macro_export]
macro_rules! log_document_result {
    ($source:expr, $result:expr) => {
        tracing::info!(
            source = %$source,
            language = %$result.language,
            success = $result.success,
            entities = $result.total_entities,
            processing_time_ms = $result.processing_time_ms,
            "Document analyzed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use oli::log_error_with_context;
/// use oli::domain::OliError;
///
/// let error = OliError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
