// OLI - Bilingual PII Detection and Anonymization
// Copyright (c) 2025 OLI Contributors
// Licensed under the MIT License

//! # OLI - Bilingual PII Detection and Anonymization
//!
//! OLI finds personally identifiable information in free-form French and
//! English text and replaces it with type tokens such as `<PERSON>` or
//! `<SIN>`.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Classifying** documents as French or English
//! - **Detecting** PII with a catalog of regex recognizers, context keyword
//!   scoring and an optional external NER provider
//! - **Resolving** overlapping candidates into disjoint spans
//! - **Anonymizing** text in a single pass with configurable tokens
//! - **Auditing** detections with hashed values
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Detection, resolution and anonymization engine
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oli::anonymization::{AnalyzerConfig, AnalyzerEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = AnalyzerEngine::new(AnalyzerConfig::default())?;
//!
//!     let result = engine.analyze(
//!         "Le demandeur, Jean Tremblay, NAS 123-456-789, jean@example.com",
//!         None,
//!     );
//!
//!     println!("{}", result.anonymized_text);
//!     println!("Found {} entities", result.total_entities);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! [`AnalyzerEngine::analyze`](anonymization::AnalyzerEngine::analyze) never
//! returns the original text as a fallback. When the pipeline fails the
//! result carries `success = false`, an empty `anonymized_text` and the
//! error message.
//!
//! ## Error Handling
//!
//! OLI uses the [`domain::OliError`] type for all library errors:
//!
//! ```rust,no_run
//! use oli::domain::OliError;
//!
//! fn example() -> Result<(), OliError> {
//!     let config = oli::config::load_config("oli.toml")?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! OLI uses structured logging with the `tracing` crate. Matched PII text
//! is never logged; the audit trail stores SHA-256 hashes instead.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
