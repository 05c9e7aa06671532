//! Named-entity recognition gating
//!
//! Statistical NER is an optional collaborator. The engine loads it once,
//! only asks it about languages it has a model for, never asks it about
//! French text, and keeps only entity types with a low false-positive rate.

use crate::anonymization::language::Language;
use crate::anonymization::models::{entity_types, CandidateSpan, DetectionMethod};
use crate::domain::{OliError, Result};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// Source name recorded on NER candidates
pub const NER_SOURCE: &str = "ner";

/// Entity types kept from NER output
///
/// Generic PERSON, LOCATION and ORGANIZATION results are never kept.
pub const NER_ALLOWED_ENTITY_TYPES: &[&str] = &[
    entity_types::DATE_TIME,
    entity_types::URL,
    entity_types::IP_ADDRESS,
    entity_types::EMAIL_ADDRESS,
    entity_types::PHONE_NUMBER,
    entity_types::CREDIT_CARD,
    entity_types::IBAN_CODE,
    entity_types::CA_SIN,
    entity_types::CA_UCI,
    entity_types::CA_POSTAL_CODE,
    entity_types::CA_PASSPORT,
];

/// Entity reported by a NER provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerEntity {
    /// Entity type
    pub entity_type: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// Model confidence
    pub score: f32,
}

/// External statistical NER collaborator
pub trait NerEntityProvider: Send + Sync {
    /// Provider name (for logs)
    fn name(&self) -> &str;

    /// Load models, returning the languages that have one
    ///
    /// Called at most once per provider.
    fn load(&self) -> anyhow::Result<Vec<Language>>;

    /// Find entities in `text`
    fn analyze(&self, text: &str, language: Language) -> anyhow::Result<Vec<NerEntity>>;
}

/// NER provider with one-time, single-flight model loading
pub struct LazyNerProvider {
    inner: Arc<dyn NerEntityProvider>,
    languages: OnceLock<Option<Vec<Language>>>,
}

impl LazyNerProvider {
    /// Wrap a provider; nothing is loaded until first use
    pub fn new(inner: Arc<dyn NerEntityProvider>) -> Self {
        Self {
            inner,
            languages: OnceLock::new(),
        }
    }

    /// Provider name
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Languages with a loaded model, loading on first call
    ///
    /// Concurrent first callers block until the single load completes.
    pub fn loaded_languages(&self) -> Option<&[Language]> {
        self.languages
            .get_or_init(|| match self.load() {
                Ok(languages) => {
                    tracing::info!(
                        provider = self.inner.name(),
                        languages = ?languages,
                        "NER provider loaded"
                    );
                    Some(languages)
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.inner.name(),
                        error = %e,
                        "NER provider unavailable, continuing with pattern recognizers only"
                    );
                    None
                }
            })
            .as_deref()
    }

    /// True when the provider loaded successfully
    pub fn is_available(&self) -> bool {
        self.loaded_languages().is_some()
    }

    /// True when a model is loaded for `language`
    pub fn supports(&self, language: Language) -> bool {
        self.loaded_languages()
            .is_some_and(|languages| languages.contains(&language))
    }

    fn load(&self) -> Result<Vec<Language>> {
        match catch_unwind(AssertUnwindSafe(|| self.inner.load())) {
            Ok(Ok(languages)) => Ok(languages),
            Ok(Err(e)) => Err(OliError::ProviderUnavailable(e.to_string())),
            Err(_) => Err(OliError::ProviderUnavailable(
                "provider panicked while loading".to_string(),
            )),
        }
    }

    fn analyze(&self, text: &str, language: Language) -> Result<Vec<NerEntity>> {
        match catch_unwind(AssertUnwindSafe(|| self.inner.analyze(text, language))) {
            Ok(Ok(entities)) => Ok(entities),
            Ok(Err(e)) => Err(OliError::recognizer(NER_SOURCE, e.to_string())),
            Err(_) => Err(OliError::recognizer(
                NER_SOURCE,
                "provider panicked during analysis",
            )),
        }
    }
}

impl std::fmt::Debug for LazyNerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyNerProvider")
            .field("name", &self.inner.name())
            .field("languages", &self.languages.get())
            .finish()
    }
}

/// Gated NER candidates for `text`
///
/// Returns no candidates for French or for a language without a loaded
/// model. Entities outside [`NER_ALLOWED_ENTITY_TYPES`] and entities with
/// invalid offsets are dropped.
pub fn maybe_ner_entities(
    text: &str,
    language: Language,
    provider: &LazyNerProvider,
) -> Result<Vec<CandidateSpan>> {
    if language == Language::French || !provider.supports(language) {
        return Ok(Vec::new());
    }

    let entities = provider.analyze(text, language)?;

    let mut candidates = Vec::with_capacity(entities.len());
    for entity in entities {
        if !NER_ALLOWED_ENTITY_TYPES.contains(&entity.entity_type.as_str()) {
            continue;
        }
        if !entity.score.is_finite() {
            continue;
        }

        match CandidateSpan::from_text(
            text,
            entity.entity_type.as_str(),
            entity.start,
            entity.end,
            entity.score,
            NER_SOURCE,
            DetectionMethod::Ner,
        ) {
            Some(candidate) => candidates.push(candidate),
            None => tracing::warn!(
                provider = provider.name(),
                entity_type = %entity.entity_type,
                start = entity.start,
                end = entity.end,
                "Discarding NER entity with invalid offsets"
            ),
        }
    }

    Ok(candidates)
}
