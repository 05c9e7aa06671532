//! Audit logger for analysis calls

use crate::anonymization::models::{AnonymizationResult, ResolvedEntity};
use crate::domain::{OliError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    language: String,
    detector: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    entities_count: usize,
    processing_time_ms: u64,
    entities: Vec<AuditEntity>,
}

/// Audit entity entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditEntity {
    entity_type: String,
    start: usize,
    end: usize,
    score: f32,
    source: String,
    /// SHA-256 hash of the matched text (never log plaintext PII)
    text_hash: String,
}

/// Audit logger for analysis calls
///
/// Appends one line per call. Writes are serialized so concurrent callers
/// never interleave partial lines.
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                OliError::Configuration(format!(
                    "Failed to create audit log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    /// Audit log file path
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log an analysis result
    pub fn log_analysis(&self, result: &AnonymizationResult) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: result.timestamp.to_rfc3339(),
            language: result.language.code().to_string(),
            detector: result.detector.clone(),
            success: result.success,
            error: result.error.clone(),
            entities_count: result.total_entities,
            processing_time_ms: result.processing_time_ms,
            entities: result.entities.iter().map(Self::audit_entity).collect(),
        };

        self.write_entry(&entry)
    }

    fn audit_entity(entity: &ResolvedEntity) -> AuditEntity {
        AuditEntity {
            entity_type: entity.entity_type.clone(),
            start: entity.start,
            end: entity.end,
            score: entity.score,
            source: entity.source.clone(),
            text_hash: hash_pii_value(&entity.matched_text),
        }
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            let types: Vec<&str> = entry.entities.iter().map(|e| e.entity_type.as_str()).collect();
            format!(
                "[{}] Language: {} | Detector: {} | Success: {} | Entities: {} [{}] | Time: {}ms",
                entry.timestamp,
                entry.language,
                entry.detector,
                entry.success,
                entry.entities_count,
                types.join(", "),
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| OliError::Io("audit log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("log_path", &self.log_path)
            .field("json_format", &self.json_format)
            .finish()
    }
}

/// Hash a PII value using SHA-256
pub fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
