//! Analyzer configuration

use crate::anonymization::language::Language;
use crate::domain::{OliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Engine configuration, read once at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Languages the classifier may return (`en`, `fr`)
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Minimum confidence for a candidate to survive resolution
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,

    /// Replacement tokens merged over the built-in defaults
    #[serde(default)]
    pub custom_operators: HashMap<String, String>,

    /// Path to a recognizer catalog TOML file (built-in catalog when unset)
    #[serde(default)]
    pub recognizer_library: Option<PathBuf>,

    /// Use the NER provider when one is supplied
    #[serde(default = "default_true")]
    pub ner_enabled: bool,

    /// Per-regex backtracking bound
    #[serde(default = "default_max_backtrack_steps")]
    pub max_backtrack_steps: usize,

    /// Context keyword scoring
    #[serde(default)]
    pub context: ContextConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            score_threshold: default_score_threshold(),
            custom_operators: HashMap::new(),
            recognizer_library: None,
            ner_enabled: true,
            max_backtrack_steps: default_max_backtrack_steps(),
            context: ContextConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.parsed_languages()?;

        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(OliError::Configuration(format!(
                "analyzer.score_threshold must be within [0, 1], got {}",
                self.score_threshold
            )));
        }

        for (entity_type, token) in &self.custom_operators {
            if entity_type.trim().is_empty() || token.is_empty() {
                return Err(OliError::Configuration(format!(
                    "analyzer.custom_operators entry '{entity_type}' must have a non-empty entity type and token"
                )));
            }
        }

        if let Some(ref path) = self.recognizer_library {
            if !path.exists() {
                return Err(OliError::Configuration(format!(
                    "Recognizer library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(OliError::Configuration(format!(
                    "Recognizer library must be a TOML file: {}",
                    path.display()
                )));
            }
        }

        if self.max_backtrack_steps == 0 {
            return Err(OliError::Configuration(
                "analyzer.max_backtrack_steps must be > 0".to_string(),
            ));
        }

        self.context.validate()?;
        self.audit.validate()?;

        Ok(())
    }

    /// Configured languages, in order
    pub fn parsed_languages(&self) -> Result<Vec<Language>> {
        if self.languages.is_empty() {
            return Err(OliError::Configuration(
                "analyzer.languages must not be empty".to_string(),
            ));
        }

        self.languages
            .iter()
            .map(|code| {
                code.parse::<Language>()
                    .map_err(|e| OliError::Configuration(format!("analyzer.languages: {e}")))
            })
            .collect()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("OLI_ANALYZER_LANGUAGES") {
            self.languages = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_SCORE_THRESHOLD") {
            self.score_threshold = val.parse().map_err(|_| {
                OliError::Configuration(format!("Invalid OLI_ANALYZER_SCORE_THRESHOLD value: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_RECOGNIZER_LIBRARY") {
            self.recognizer_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_NER_ENABLED") {
            self.ner_enabled = val.parse().map_err(|_| {
                OliError::Configuration(format!("Invalid OLI_ANALYZER_NER_ENABLED value: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_CONTEXT_BOOST") {
            self.context.boost = val.parse().map_err(|_| {
                OliError::Configuration(format!("Invalid OLI_ANALYZER_CONTEXT_BOOST value: {val}"))
            })?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Context keyword scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Characters inspected before a match
    #[serde(default = "default_window_chars")]
    pub window_chars: usize,

    /// Score increase when a keyword is found (result capped at 1.0)
    #[serde(default = "default_boost")]
    pub boost: f32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window_chars: default_window_chars(),
            boost: default_boost(),
        }
    }
}

impl ContextConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.boost) {
            return Err(OliError::Configuration(format!(
                "analyzer.context.boost must be within [0, 1], got {}",
                self.boost
            )));
        }
        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err(OliError::Configuration(
                "analyzer.audit.log_path must be set when audit logging is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("OLI_ANALYZER_AUDIT_ENABLED") {
            self.enabled = val.parse().map_err(|_| {
                OliError::Configuration(format!("Invalid OLI_ANALYZER_AUDIT_ENABLED value: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("OLI_ANALYZER_AUDIT_JSON_FORMAT") {
            self.json_format = val.parse().map_err(|_| {
                OliError::Configuration(format!(
                    "Invalid OLI_ANALYZER_AUDIT_JSON_FORMAT value: {val}"
                ))
            })?;
        }

        Ok(())
    }
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

fn default_score_threshold() -> f32 {
    0.7
}

fn default_true() -> bool {
    true
}

fn default_max_backtrack_steps() -> usize {
    1_000_000
}

fn default_window_chars() -> usize {
    40
}

fn default_boost() -> f32 {
    0.4
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.languages, vec!["en", "fr"]);
        assert!((config.score_threshold - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.context.window_chars, 40);
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        let config = AnalyzerConfig {
            score_threshold: 1.5,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OliError::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_language() {
        let config = AnalyzerConfig {
            languages: vec!["en".to_string(), "de".to_string()],
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_languages() {
        let config = AnalyzerConfig {
            languages: Vec::new(),
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_recognizer_library() {
        let config = AnalyzerConfig {
            recognizer_library: Some(PathBuf::from("/nonexistent/recognizers.toml")),
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_custom_operator_token() {
        let mut config = AnalyzerConfig::default();
        config
            .custom_operators
            .insert("CA_SIN".to_string(), String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: AnalyzerConfig = toml::from_str(
            r#"
score_threshold = 0.8

[custom_operators]
EMAIL_ADDRESS = "<COURRIEL>"

[context]
boost = 0.35
"#,
        )
        .unwrap();
        assert!((config.score_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.languages, vec!["en", "fr"]);
        assert_eq!(config.context.window_chars, 40);
        assert_eq!(
            config.custom_operators.get("EMAIL_ADDRESS").map(String::as_str),
            Some("<COURRIEL>")
        );
    }
}
