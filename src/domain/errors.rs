//! Domain error types
//!
//! This module defines the error hierarchy for OLI. Only configuration errors
//! are allowed to abort engine construction; every other variant describes a
//! per-call failure that the engine recovers from at the narrowest scope.

use thiserror::Error;

/// Main OLI error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum OliError {
    /// Malformed configuration or recognizer definition (fatal at construction)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single recognizer or the NER provider failed during a call
    #[error("Recognizer '{recognizer}' failed: {message}")]
    Recognizer {
        /// Recognizer name (or provider name)
        recognizer: String,
        /// Failure description
        message: String,
    },

    /// The NER provider could not be loaded
    #[error("NER provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The detection pipeline failed as a whole
    #[error("Detection pipeline failed: {0}")]
    Pipeline(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl OliError {
    /// Creates a recognizer failure
    pub fn recognizer(recognizer: impl Into<String>, message: impl Into<String>) -> Self {
        OliError::Recognizer {
            recognizer: recognizer.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error must prevent engine startup
    pub fn is_fatal(&self) -> bool {
        matches!(self, OliError::Configuration(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for OliError {
    fn from(err: std::io::Error) -> Self {
        OliError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for OliError {
    fn from(err: serde_json::Error) -> Self {
        OliError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for OliError {
    fn from(err: toml::de::Error) -> Self {
        OliError::Configuration(format!("TOML parse error: {err}"))
    }
}
