//! Main analyzer engine
//!
//! This module provides the [`AnalyzerEngine`] that wires language
//! classification, candidate detection, span resolution, redaction and
//! audit logging into the public `detect`, `anonymize` and `analyze`
//! operations.
//!
//! # Examples
//!
//! ```no_run
//! use oli::anonymization::{AnalyzerConfig, AnalyzerEngine};
//!
//! # fn example() -> oli::domain::Result<()> {
//! let engine = AnalyzerEngine::new(AnalyzerConfig::default())?;
//!
//! let result = engine.analyze("NAS : 123-456-789", None);
//! assert_eq!(result.anonymized_text, "NAS : <SIN>");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    anonymizer::{self, ReplacementTokens},
    audit::AuditLogger,
    config::AnalyzerConfig,
    detector::{
        context::ContextScorer,
        ner::{LazyNerProvider, NerEntityProvider, NER_ALLOWED_ENTITY_TYPES},
        patterns::RecognizerCatalog,
        resolver::{is_well_formed, SpanResolver},
        HybridDetector, PatternDetector, PiiDetector,
    },
    language::{Language, LanguageClassifier},
    models::{AnonymizationResult, ResolvedEntity},
};
use crate::domain::{OliError, Result};
use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Main analyzer engine
///
/// # Thread Safety
///
/// The catalog, token map and detector are immutable after construction,
/// so one engine can be shared across threads behind an `Arc`. The only
/// lazily initialized state is the NER provider, loaded once during
/// construction.
pub struct AnalyzerEngine {
    config: AnalyzerConfig,
    languages: Vec<Language>,
    catalog: Arc<RecognizerCatalog>,
    detector: Box<dyn PiiDetector>,
    resolver: SpanResolver,
    tokens: ReplacementTokens,
    classifier: LanguageClassifier,
    ner: Option<Arc<LazyNerProvider>>,
    audit_logger: Option<AuditLogger>,
}

impl AnalyzerEngine {
    /// Create a pattern-only engine
    ///
    /// # Errors
    ///
    /// Returns [`OliError::Configuration`] if:
    /// - Configuration validation fails
    /// - The recognizer library cannot be loaded or compiled
    /// - The audit log directory cannot be created
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Create an engine backed by a NER provider
    ///
    /// The provider is loaded once here. If it fails to load, or NER is
    /// disabled in the configuration, the engine runs pattern-only.
    pub fn with_ner_provider(
        config: AnalyzerConfig,
        provider: Arc<dyn NerEntityProvider>,
    ) -> Result<Self> {
        Self::build(config, Some(provider))
    }

    fn build(config: AnalyzerConfig, provider: Option<Arc<dyn NerEntityProvider>>) -> Result<Self> {
        config.validate()?;
        let languages = config.parsed_languages()?;

        let catalog = match config.recognizer_library {
            Some(ref path) => RecognizerCatalog::from_file(path, config.max_backtrack_steps)?,
            None => RecognizerCatalog::builtin(config.max_backtrack_steps)?,
        };
        let catalog = Arc::new(catalog);

        let patterns = PatternDetector::new(catalog.clone(), ContextScorer::from(&config.context));

        let ner = match provider {
            Some(provider) if config.ner_enabled => Some(Arc::new(LazyNerProvider::new(provider))),
            Some(_) => {
                tracing::info!("NER disabled by configuration, ignoring provider");
                None
            }
            None => None,
        };

        let detector: Box<dyn PiiDetector> = match ner {
            Some(ref ner) if ner.is_available() => {
                Box::new(HybridDetector::new(patterns, ner.clone()))
            }
            _ => Box::new(patterns),
        };

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        tracing::info!(
            recognizers = catalog.len(),
            detector = detector.name(),
            ner_available = ner.as_ref().is_some_and(|n| n.is_available()),
            languages = ?languages,
            score_threshold = config.score_threshold,
            "Analyzer engine initialized"
        );

        Ok(Self {
            tokens: ReplacementTokens::new(&config.custom_operators),
            config,
            languages,
            catalog,
            detector,
            resolver: SpanResolver::new(),
            classifier: LanguageClassifier::new(),
            ner,
            audit_logger,
        })
    }

    /// Language used for `text`
    ///
    /// An explicit language is honoured. A classified language outside the
    /// configured set falls back to the first configured language.
    pub fn resolve_language(&self, text: &str, language: Option<Language>) -> Language {
        if let Some(language) = language {
            return language;
        }

        let classified = self.classifier.classify(text);
        if self.languages.contains(&classified) {
            classified
        } else {
            self.languages.first().copied().unwrap_or(classified)
        }
    }

    /// Detect PII entities without modifying the text
    ///
    /// # Errors
    ///
    /// Returns [`OliError::Pipeline`] when no recognizer could run.
    pub fn detect(&self, text: &str, language: Option<Language>) -> Result<Vec<ResolvedEntity>> {
        let language = self.resolve_language(text, language);
        self.detect_with_language(text, language)
    }

    /// Detect and redact PII, returning the rewritten text
    pub fn anonymize(&self, text: &str, language: Option<Language>) -> Result<String> {
        let entities = self.detect(text, language)?;
        anonymizer::apply(text, &entities, &self.tokens)
    }

    /// Detect and redact PII, returning the full result
    ///
    /// Never fails: a pipeline failure (including a panic) yields a result
    /// with `success == false`, an error message and no anonymized text.
    pub fn analyze(&self, text: &str, language: Option<Language>) -> AnonymizationResult {
        let start = Instant::now();
        let language = self.resolve_language(text, language);

        let outcome = catch_unwind(AssertUnwindSafe(|| self.run_pipeline(text, language)))
            .unwrap_or_else(|_| Err(OliError::Pipeline("detection pipeline panicked".to_string())));

        let processing_time_ms = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok((anonymized_text, entities)) => {
                tracing::debug!(
                    language = %language,
                    entities = entities.len(),
                    processing_time_ms,
                    "Analysis completed"
                );
                AnonymizationResult::completed(
                    text.to_string(),
                    anonymized_text,
                    entities,
                    language,
                    self.detector.name(),
                    processing_time_ms,
                )
            }
            Err(e) => {
                tracing::error!(language = %language, error = %e, "Analysis failed");
                AnonymizationResult::failed(
                    text.to_string(),
                    language,
                    self.detector.name(),
                    e.to_string(),
                    processing_time_ms,
                )
            }
        };

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_analysis(&result) {
                tracing::warn!(
                    path = %logger.log_path().display(),
                    error = %e,
                    "Failed to write audit entry"
                );
            }
        }

        result
    }

    /// Entity types the engine can produce, sorted
    ///
    /// With a loaded NER provider this includes the NER allow-list.
    pub fn supported_entity_types(&self) -> Vec<String> {
        let mut types: BTreeSet<String> = self.catalog.entity_types().into_iter().collect();
        if self.is_available() {
            types.extend(NER_ALLOWED_ENTITY_TYPES.iter().map(|t| t.to_string()));
        }
        types.into_iter().collect()
    }

    /// True only when the NER provider loaded successfully
    pub fn is_available(&self) -> bool {
        self.ner.as_ref().is_some_and(|ner| ner.is_available())
    }

    /// Name of the detector strategy in use (`pattern` or `hybrid`)
    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    /// The recognizer catalog
    pub fn catalog(&self) -> &RecognizerCatalog {
        &self.catalog
    }

    /// The engine configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn detect_with_language(&self, text: &str, language: Language) -> Result<Vec<ResolvedEntity>> {
        let candidates = self.detector.detect_candidates(text, language)?;
        let candidate_count = candidates.len();
        let entities = self.resolver.resolve(candidates, self.config.score_threshold);

        tracing::debug!(
            language = %language,
            candidates = candidate_count,
            entities = entities.len(),
            "Resolved candidate spans"
        );

        Ok(entities)
    }

    fn run_pipeline(&self, text: &str, language: Language) -> Result<(String, Vec<ResolvedEntity>)> {
        let entities = self.detect_with_language(text, language)?;
        if !is_well_formed(&entities) {
            return Err(OliError::Pipeline(
                "resolved entities overlap or are out of order".to_string(),
            ));
        }
        let anonymized = anonymizer::apply(text, &entities, &self.tokens)?;
        Ok((anonymized, entities))
    }
}

impl std::fmt::Debug for AnalyzerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerEngine")
            .field("languages", &self.languages)
            .field("recognizers", &self.catalog.len())
            .field("detector", &self.detector.name())
            .field("ner", &self.ner)
            .field("audit", &self.audit_logger.is_some())
            .finish()
    }
}
