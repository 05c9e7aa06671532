//! Recognizer catalog for PII detection
//!
//! The catalog is built once at engine construction and never mutated
//! afterwards, so it can be shared read-only across threads.

use crate::anonymization::detector::validators::ValidatorKind;
use crate::domain::{OliError, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Pattern label (for logs)
    pub label: String,
    /// Regular expression
    pub regex: String,
    /// Base confidence score (0.0 - 1.0)
    pub score: f32,
    /// Match case-sensitively (default: case-insensitive)
    #[serde(default)]
    pub case_sensitive: bool,
    /// Capture group that becomes the entity span (default: whole match)
    #[serde(default)]
    pub capture_group: Option<usize>,
    /// Checksum applied to the matched text
    #[serde(default)]
    pub validator: Option<ValidatorKind>,
}

/// Recognizer definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerDefinition {
    /// Unique recognizer name
    pub name: String,
    /// Entity type emitted by every pattern of this recognizer
    pub entity_type: String,
    /// Ordered patterns
    pub patterns: Vec<PatternDefinition>,
    /// Context keywords (case-insensitive, whole words)
    #[serde(default)]
    pub context: Vec<String>,
}

/// Recognizer library container
#[derive(Debug, Deserialize)]
struct RecognizerLibrary {
    recognizers: Vec<RecognizerDefinition>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Pattern label
    pub label: String,
    /// Compiled regex with a bounded backtracking budget
    pub regex: fancy_regex::Regex,
    /// Base confidence score
    pub score: f32,
    /// Capture group index used for the span
    pub capture_group: usize,
    /// Checksum applied to the matched text
    pub validator: Option<ValidatorKind>,
}

/// Compiled recognizer
#[derive(Debug, Clone)]
pub struct Recognizer {
    /// Unique recognizer name
    pub name: String,
    /// Entity type
    pub entity_type: String,
    /// Compiled patterns, in definition order
    pub patterns: Vec<CompiledPattern>,
    /// Context keywords as defined
    pub context: Vec<String>,
    context_matcher: Option<regex::Regex>,
}

impl Recognizer {
    /// Check whether any context keyword appears in `window`
    pub fn has_context_keyword(&self, window: &str) -> bool {
        self.context_matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(window))
    }

    fn compile(def: &RecognizerDefinition, backtrack_limit: usize) -> Result<Self> {
        if def.name.trim().is_empty() {
            return Err(OliError::Configuration(
                "Recognizer name must not be empty".to_string(),
            ));
        }
        if def.entity_type.trim().is_empty() {
            return Err(OliError::Configuration(format!(
                "Recognizer '{}' has an empty entity_type",
                def.name
            )));
        }
        if def.patterns.is_empty() {
            return Err(OliError::Configuration(format!(
                "Recognizer '{}' defines no patterns",
                def.name
            )));
        }

        let patterns = def
            .patterns
            .iter()
            .map(|p| Self::compile_pattern(&def.name, p, backtrack_limit))
            .collect::<Result<Vec<_>>>()?;

        let context_matcher = Self::compile_context(&def.name, &def.context)?;

        Ok(Self {
            name: def.name.clone(),
            entity_type: def.entity_type.clone(),
            patterns,
            context: def.context.clone(),
            context_matcher,
        })
    }

    fn compile_pattern(
        recognizer: &str,
        def: &PatternDefinition,
        backtrack_limit: usize,
    ) -> Result<CompiledPattern> {
        if !(0.0..=1.0).contains(&def.score) {
            return Err(OliError::Configuration(format!(
                "Pattern '{}' in recognizer '{recognizer}' has score {} outside [0, 1]",
                def.label, def.score
            )));
        }

        let source = if def.case_sensitive {
            def.regex.clone()
        } else {
            format!("(?i){}", def.regex)
        };

        let regex = fancy_regex::RegexBuilder::new(&source)
            .backtrack_limit(backtrack_limit)
            .build()
            .map_err(|e| {
                OliError::Configuration(format!(
                    "Invalid regex in pattern '{}' of recognizer '{recognizer}': {e}",
                    def.label
                ))
            })?;

        let capture_group = def.capture_group.unwrap_or(0);
        if capture_group >= regex.captures_len() {
            return Err(OliError::Configuration(format!(
                "Pattern '{}' in recognizer '{recognizer}' selects capture group {capture_group} but the regex has {} groups",
                def.label,
                regex.captures_len() - 1
            )));
        }

        Ok(CompiledPattern {
            label: def.label.clone(),
            regex,
            score: def.score,
            capture_group,
            validator: def.validator,
        })
    }

    fn compile_context(recognizer: &str, keywords: &[String]) -> Result<Option<regex::Regex>> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(k).replace(' ', r"\s+"))
            .collect();

        if alternatives.is_empty() {
            return Ok(None);
        }

        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        regex::RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|e| {
                OliError::Configuration(format!(
                    "Invalid context keywords in recognizer '{recognizer}': {e}"
                ))
            })
    }
}

/// Immutable catalog of compiled recognizers
#[derive(Debug, Clone)]
pub struct RecognizerCatalog {
    recognizers: Vec<Recognizer>,
}

impl RecognizerCatalog {
    /// Create a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P, backtrack_limit: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            OliError::Configuration(format!(
                "Failed to read recognizer library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content, backtrack_limit)
    }

    /// Create a catalog from TOML content
    pub fn from_toml(content: &str, backtrack_limit: usize) -> Result<Self> {
        let library: RecognizerLibrary = toml::from_str(content).map_err(|e| {
            OliError::Configuration(format!("Failed to parse recognizer library TOML: {e}"))
        })?;

        Self::from_definitions(&library.recognizers, backtrack_limit)
    }

    /// Create a catalog from already-parsed definitions
    pub fn from_definitions(
        definitions: &[RecognizerDefinition],
        backtrack_limit: usize,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut recognizers = Vec::with_capacity(definitions.len());

        for def in definitions {
            if !seen.insert(def.name.as_str()) {
                return Err(OliError::Configuration(format!(
                    "Duplicate recognizer name: {}",
                    def.name
                )));
            }
            recognizers.push(Recognizer::compile(def, backtrack_limit)?);
        }

        Ok(Self { recognizers })
    }

    /// Create the built-in catalog
    pub fn builtin(backtrack_limit: usize) -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/recognizers.toml");
        Self::from_toml(default_toml, backtrack_limit)
    }

    /// Get all recognizers, in catalog order
    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// Find a recognizer by name
    pub fn get(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.name == name)
    }

    /// Distinct entity types, sorted
    pub fn entity_types(&self) -> Vec<String> {
        self.recognizers
            .iter()
            .map(|r| r.entity_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of recognizers
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// True when the catalog holds no recognizer
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1_000_000;

    fn is_match(catalog: &RecognizerCatalog, recognizer: &str, text: &str) -> bool {
        catalog
            .get(recognizer)
            .unwrap()
            .patterns
            .iter()
            .any(|p| p.regex.is_match(text).unwrap())
    }

    #[test]
    fn test_load_builtin_catalog() {
        let catalog = RecognizerCatalog::builtin(LIMIT).unwrap();
        assert!(!catalog.is_empty());
        let types = catalog.entity_types();
        for expected in [
            "CA_SIN",
            "CA_POSTAL_CODE",
            "CA_UCI",
            "CA_PASSPORT",
            "PHONE_NUMBER",
            "BANK_ACCOUNT",
            "EMAIL_ADDRESS",
            "CREDIT_CARD",
            "PERSON",
        ] {
            assert!(types.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_sin_patterns() {
        let catalog = RecognizerCatalog::builtin(LIMIT).unwrap();
        assert!(is_match(&catalog, "canadian_sin", "NAS 123-456-789"));
        assert!(is_match(&catalog, "canadian_sin", "SIN 123 456 789"));
        assert!(!is_match(&catalog, "canadian_sin", "12-34"));
    }

    #[test]
    fn test_passport_is_case_sensitive() {
        let catalog = RecognizerCatalog::builtin(LIMIT).unwrap();
        assert!(is_match(&catalog, "canadian_passport", "AB123456"));
        assert!(!is_match(&catalog, "canadian_passport", "ab123456"));
    }

    #[test]
    fn test_postal_code_is_case_insensitive() {
        let catalog = RecognizerCatalog::builtin(LIMIT).unwrap();
        assert!(is_match(&catalog, "canadian_postal_code", "H2X 1Y4"));
        assert!(is_match(&catalog, "canadian_postal_code", "h2x1y4"));
    }

    #[test]
    fn test_context_keywords_match_whole_words() {
        let catalog = RecognizerCatalog::builtin(LIMIT).unwrap();
        let sin = catalog.get("canadian_sin").unwrap();
        assert!(sin.has_context_keyword("Mon NAS est"));
        assert!(sin.has_context_keyword("Numéro d'assurance sociale :"));
        assert!(!sin.has_context_keyword("using a business dynasty"));
    }

    #[test]
    fn test_invalid_regex_is_config_error() {
        let toml = r#"
[[recognizers]]
name = "broken"
entity_type = "BROKEN"
[[recognizers.patterns]]
label = "bad"
regex = '(\d{3}'
score = 0.5
"#;
        let err = RecognizerCatalog::from_toml(toml, LIMIT).unwrap_err();
        assert!(matches!(err, OliError::Configuration(_)));
    }

    #[test]
    fn test_score_out_of_range_is_config_error() {
        let toml = r#"
[[recognizers]]
name = "too_sure"
entity_type = "X"
[[recognizers.patterns]]
label = "p"
regex = '\d+'
score = 1.2
"#;
        assert!(RecognizerCatalog::from_toml(toml, LIMIT).is_err());
    }

    #[test]
    fn test_capture_group_out_of_range() {
        let toml = r#"
[[recognizers]]
name = "grouped"
entity_type = "X"
[[recognizers.patterns]]
label = "p"
regex = 'id:(\d+)'
score = 0.5
capture_group = 2
"#;
        assert!(RecognizerCatalog::from_toml(toml, LIMIT).is_err());
    }

    #[test]
    fn test_duplicate_recognizer_names() {
        let toml = r#"
[[recognizers]]
name = "dup"
entity_type = "X"
[[recognizers.patterns]]
label = "p"
regex = '\d+'
score = 0.5

[[recognizers]]
name = "dup"
entity_type = "Y"
[[recognizers.patterns]]
label = "p"
regex = '\d+'
score = 0.5
"#;
        assert!(RecognizerCatalog::from_toml(toml, LIMIT).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(RecognizerCatalog::from_file("/nonexistent/recognizers.toml", LIMIT).is_err());
    }
}
