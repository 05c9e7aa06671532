//! Anonymization module for OLI
//!
//! This module provides bilingual (French/English) PII detection and
//! anonymization for free-form text.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Language**: heuristic `fr`/`en` classification that gates NER
//! - **Detection**: catalog-driven pattern recognizers with context
//!   scoring, optionally augmented by an external NER provider
//! - **Resolution**: greedy overlap resolution into sorted, disjoint spans
//! - **Anonymization**: single-pass replacement with type tokens
//! - **Audit**: structured logging with hashed PII values
//!
//! # Usage
//!
//! ```rust,no_run
//! use oli::anonymization::{AnalyzerConfig, AnalyzerEngine};
//!
//! # fn example() -> oli::domain::Result<()> {
//! let engine = AnalyzerEngine::new(AnalyzerConfig::default())?;
//! let anonymized = engine.anonymize("Courriel : sophie.martin@email.com", None)?;
//! assert_eq!(anonymized, "Courriel : <EMAIL>");
//! # Ok(())
//! # }
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod language;
pub mod models;
pub mod report;

// Re-export main types
pub use config::AnalyzerConfig;
pub use engine::AnalyzerEngine;
pub use language::{Language, LanguageClassifier};
pub use models::{AnonymizationResult, CandidateSpan, ResolvedEntity};
pub use report::BatchReport;
