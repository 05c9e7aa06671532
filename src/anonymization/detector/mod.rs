//! PII detection module
//!
//! Provides the trait-based detection interface and the two detector
//! strategies. [`PatternDetector`] runs the recognizer catalog alone;
//! [`HybridDetector`] adds gated NER candidates on top of it. The engine
//! picks one at construction and feeds its output to the span resolver.

pub mod context;
pub mod ner;
pub mod patterns;
pub mod resolver;
pub mod scanner;
pub mod validators;

use crate::anonymization::language::Language;
use crate::anonymization::models::CandidateSpan;
use crate::domain::{OliError, Result};
use context::ContextScorer;
use ner::{maybe_ner_entities, LazyNerProvider};
use patterns::RecognizerCatalog;
use scanner::CandidateScanner;
use std::sync::Arc;

/// Trait for PII detection strategies
pub trait PiiDetector: Send + Sync {
    /// Strategy name (recorded on results and audit entries)
    fn name(&self) -> &'static str;

    /// Scored, unresolved candidates for `text`
    ///
    /// Returns an error only when no recognizer could run.
    fn detect_candidates(&self, text: &str, language: Language) -> Result<Vec<CandidateSpan>>;
}

/// Pattern-only detector
#[derive(Debug, Clone)]
pub struct PatternDetector {
    catalog: Arc<RecognizerCatalog>,
    scanner: CandidateScanner,
    scorer: ContextScorer,
}

impl PatternDetector {
    /// Create a detector over `catalog`
    pub fn new(catalog: Arc<RecognizerCatalog>, scorer: ContextScorer) -> Self {
        Self {
            catalog,
            scanner: CandidateScanner::new(),
            scorer,
        }
    }

    /// The recognizer catalog
    pub fn catalog(&self) -> &RecognizerCatalog {
        &self.catalog
    }
}

impl PiiDetector for PatternDetector {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn detect_candidates(&self, text: &str, _language: Language) -> Result<Vec<CandidateSpan>> {
        let outcome = self.scanner.scan(text, self.catalog.recognizers());

        if !self.catalog.is_empty() && outcome.failed_recognizers.len() == self.catalog.len() {
            return Err(OliError::Pipeline(format!(
                "all {} pattern recognizers failed",
                self.catalog.len()
            )));
        }

        let mut candidates = outcome.candidates;
        for candidate in &mut candidates {
            if let Some(recognizer) = self.catalog.get(&candidate.source) {
                candidate.score = self.scorer.score(candidate, text, recognizer);
            }
        }

        Ok(candidates)
    }
}

/// Pattern detector augmented with gated NER candidates
#[derive(Debug)]
pub struct HybridDetector {
    patterns: PatternDetector,
    ner: Arc<LazyNerProvider>,
}

impl HybridDetector {
    /// Create a hybrid detector
    pub fn new(patterns: PatternDetector, ner: Arc<LazyNerProvider>) -> Self {
        Self { patterns, ner }
    }
}

impl PiiDetector for HybridDetector {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn detect_candidates(&self, text: &str, language: Language) -> Result<Vec<CandidateSpan>> {
        let mut candidates = self.patterns.detect_candidates(text, language)?;

        match maybe_ner_entities(text, language, &self.ner) {
            Ok(ner_candidates) => candidates.extend(ner_candidates),
            Err(e) => tracing::warn!(
                provider = self.ner.name(),
                error = %e,
                "NER failed, using pattern candidates only"
            ),
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PatternDetector {
        let catalog = RecognizerCatalog::builtin(1_000_000).unwrap();
        PatternDetector::new(Arc::new(catalog), ContextScorer::default())
    }

    #[test]
    fn test_pattern_detector_applies_context() {
        let text = "NAS : 123456789";
        let candidates = detector()
            .detect_candidates(text, Language::French)
            .unwrap();
        let sin = candidates
            .iter()
            .find(|c| c.entity_type == "CA_SIN")
            .unwrap();
        assert!((sin.score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_all_recognizers_failing_is_an_error() {
        let toml = r#"
[[recognizers]]
name = "pathological"
entity_type = "X"
[[recognizers.patterns]]
label = "nested"
regex = '(a|b|ab)*(?=c)'
score = 0.5
"#;
        let catalog = RecognizerCatalog::from_toml(toml, 100_000).unwrap();
        let detector = PatternDetector::new(Arc::new(catalog), ContextScorer::default());
        let result = detector.detect_candidates(&"ab".repeat(28), Language::English);
        assert!(matches!(result, Err(OliError::Pipeline(_))));
    }
}
