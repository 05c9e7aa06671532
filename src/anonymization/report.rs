//! Batch reporting for anonymization runs
//!
//! Aggregates many [`AnonymizationResult`]s into detection statistics for
//! console or JSON output. Matched text never enters the report.

use crate::anonymization::models::AnonymizationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Batch report with PII detection statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Total documents analyzed
    pub total_documents: usize,

    /// Documents whose analysis failed
    pub failed_documents: usize,

    /// Total PII entities detected
    pub total_entities: usize,

    /// Entity counts by type
    pub entities_by_type: BTreeMap<String, usize>,

    /// Documents per detected language
    pub documents_by_language: BTreeMap<String, usize>,

    /// Warnings collected during the run
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per document (ms)
    pub avg_processing_time_ms: u64,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Documents with PII detected
    pub documents_with_pii: usize,

    /// Documents without PII
    pub documents_without_pii: usize,
}

impl BatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result for one document
    pub fn add_result(&mut self, source: &str, result: &AnonymizationResult) {
        self.total_documents += 1;
        self.stats.total_processing_time_ms += result.processing_time_ms;
        *self
            .documents_by_language
            .entry(result.language.code().to_string())
            .or_insert(0) += 1;

        if !result.success {
            self.failed_documents += 1;
            self.add_warning(format!(
                "{source}: {}",
                result.error.as_deref().unwrap_or("analysis failed")
            ));
        } else if result.has_detections() {
            self.stats.documents_with_pii += 1;
            self.total_entities += result.total_entities;
            for (entity_type, count) in &result.counts_by_type {
                *self.entities_by_type.entry(entity_type.clone()).or_insert(0) += count;
            }
        } else {
            self.stats.documents_without_pii += 1;
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_documents as u64;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// True when at least one document failed
    pub fn has_failures(&self) -> bool {
        self.failed_documents > 0
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Documents Analyzed:          {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents with PII:          {}\n",
            self.stats.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:       {}\n",
            self.stats.documents_without_pii
        ));
        output.push_str(&format!(
            "  Failed Documents:            {}\n",
            self.failed_documents
        ));
        output.push_str(&format!(
            "  Total PII Entities Detected: {}\n",
            self.total_entities
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.entities_by_type.is_empty() {
            output.push_str("🔍 PII DETECTIONS BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut types: Vec<_> = self.entities_by_type.iter().collect();
            types.sort_by(|a, b| b.1.cmp(a.1));

            for (entity_type, count) in types {
                output.push_str(&format!("  {entity_type:30} {count:>5}\n"));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
