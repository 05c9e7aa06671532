//! PII entity data models

use crate::anonymization::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in entity type names
pub mod entity_types {
    /// Person name
    pub const PERSON: &str = "PERSON";
    /// Location (NER only, never kept)
    pub const LOCATION: &str = "LOCATION";
    /// Organization (NER only, never kept)
    pub const ORGANIZATION: &str = "ORGANIZATION";
    /// Telephone number
    pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
    /// Email address
    pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
    /// Payment card number
    pub const CREDIT_CARD: &str = "CREDIT_CARD";
    /// Date or time expression
    pub const DATE_TIME: &str = "DATE_TIME";
    /// International bank account number
    pub const IBAN_CODE: &str = "IBAN_CODE";
    /// IPv4 address
    pub const IP_ADDRESS: &str = "IP_ADDRESS";
    /// Web URL
    pub const URL: &str = "URL";
    /// Canadian Social Insurance Number (NAS)
    pub const CA_SIN: &str = "CA_SIN";
    /// Canadian postal code
    pub const CA_POSTAL_CODE: &str = "CA_POSTAL_CODE";
    /// IRCC Unique Client Identifier
    pub const CA_UCI: &str = "CA_UCI";
    /// Canadian passport number
    pub const CA_PASSPORT: &str = "CA_PASSPORT";
    /// Bank account number
    pub const BANK_ACCOUNT: &str = "BANK_ACCOUNT";
}

/// Detection method used to identify PII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Regex recognizer from the catalog
    Pattern,
    /// External statistical NER provider
    Ner,
}

/// Unresolved detection, possibly overlapping others
///
/// Offsets are UTF-8 byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpan {
    /// Entity type (e.g. `CA_SIN`)
    pub entity_type: String,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Text covered by the span
    pub matched_text: String,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Recognizer name, or `ner`
    pub source: String,
    /// Detection method used
    pub detection_method: DetectionMethod,
}

impl CandidateSpan {
    /// Create a candidate from a span of `text`
    ///
    /// Returns `None` when the offsets are empty, out of bounds or not on
    /// character boundaries.
    pub fn from_text(
        text: &str,
        entity_type: impl Into<String>,
        start: usize,
        end: usize,
        score: f32,
        source: impl Into<String>,
        detection_method: DetectionMethod,
    ) -> Option<Self> {
        if start >= end || end > text.len() {
            return None;
        }
        let matched_text = text.get(start..end)?.to_string();
        Some(Self {
            entity_type: entity_type.into(),
            start,
            end,
            matched_text,
            score: score.clamp(0.0, 1.0),
            source: source.into(),
            detection_method,
        })
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when the two spans share at least one byte
    pub fn overlaps(&self, other: &CandidateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Final, non-overlapping detection included in output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    /// Entity type (e.g. `CA_SIN`)
    pub entity_type: String,
    /// Matched text (hashed in audit logs)
    #[serde(rename = "text")]
    pub matched_text: String,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Confidence score after context adjustment
    pub score: f32,
    /// Recognizer name, or `ner`
    pub source: String,
    /// Detection method used
    pub detection_method: DetectionMethod,
}

impl From<CandidateSpan> for ResolvedEntity {
    fn from(candidate: CandidateSpan) -> Self {
        Self {
            entity_type: candidate.entity_type,
            matched_text: candidate.matched_text,
            start: candidate.start,
            end: candidate.end,
            score: candidate.score,
            source: candidate.source,
            detection_method: candidate.detection_method,
        }
    }
}

/// Result of a single `analyze` call
#[derive(Debug, Clone, Serialize)]
pub struct AnonymizationResult {
    /// Input text (never serialized)
    #[serde(skip_serializing)]
    pub original_text: String,
    /// Rewritten text; empty when `success` is false
    pub anonymized_text: String,
    /// Resolved entities, sorted by start offset
    #[serde(rename = "entities_detected")]
    pub entities: Vec<ResolvedEntity>,
    /// Entity counts keyed by entity type
    #[serde(rename = "entities_by_type")]
    pub counts_by_type: BTreeMap<String, usize>,
    /// Number of resolved entities
    pub total_entities: usize,
    /// Language the detectors ran for
    pub language: Language,
    /// Detector strategy that produced the entities
    pub detector: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Completion timestamp
    pub timestamp: DateTime<Utc>,
    /// False when detection could not run; the text is then not anonymized
    pub success: bool,
    /// Failure description when `success` is false
    pub error: Option<String>,
}

impl AnonymizationResult {
    /// Create a successful result
    pub fn completed(
        original_text: String,
        anonymized_text: String,
        entities: Vec<ResolvedEntity>,
        language: Language,
        detector: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        let mut counts_by_type = BTreeMap::new();
        for entity in &entities {
            *counts_by_type.entry(entity.entity_type.clone()).or_insert(0) += 1;
        }

        Self {
            original_text,
            anonymized_text,
            total_entities: entities.len(),
            entities,
            counts_by_type,
            language,
            detector: detector.into(),
            processing_time_ms,
            timestamp: Utc::now(),
            success: true,
            error: None,
        }
    }

    /// Create a failed result
    ///
    /// The anonymized text is left empty so unredacted input can never be
    /// mistaken for anonymized output.
    pub fn failed(
        original_text: String,
        language: Language,
        detector: impl Into<String>,
        error: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            original_text,
            anonymized_text: String::new(),
            entities: Vec::new(),
            counts_by_type: BTreeMap::new(),
            total_entities: 0,
            language,
            detector: detector.into(),
            processing_time_ms,
            timestamp: Utc::now(),
            success: false,
            error: Some(error.into()),
        }
    }

    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Serialize the result as a JSON value
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
