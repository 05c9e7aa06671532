//! Error handling tests: construction failures, pipeline failures and the
//! audit trail

use oli::anonymization::audit::hash_pii_value;
use oli::anonymization::config::AuditConfig;
use oli::anonymization::{AnalyzerConfig, AnalyzerEngine};
use oli::domain::OliError;
use std::path::PathBuf;
use tempfile::TempDir;

const PATHOLOGICAL_LIBRARY: &str = r#"
[[recognizers]]
name = "pathological"
entity_type = "CUSTOM_ID"

[[recognizers.patterns]]
label = "nested"
regex = '(a|b|ab)*(?=c)'
score = 0.9
"#;

const MIXED_LIBRARY: &str = r#"
[[recognizers]]
name = "pathological"
entity_type = "CUSTOM_ID"

[[recognizers.patterns]]
label = "nested"
regex = '(a|b|ab)*(?=c)'
score = 0.9

[[recognizers]]
name = "email_address"
entity_type = "EMAIL_ADDRESS"

[[recognizers.patterns]]
label = "email"
regex = '\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b'
score = 1.0
"#;

fn write_library(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("recognizers.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn engine_with_library(path: PathBuf) -> AnalyzerEngine {
    let config = AnalyzerConfig {
        recognizer_library: Some(path),
        max_backtrack_steps: 100_000,
        ..AnalyzerConfig::default()
    };
    AnalyzerEngine::new(config).expect("Failed to create engine")
}

fn backtracking_input() -> String {
    "ab".repeat(28)
}

#[test]
fn test_all_recognizers_failing_fails_the_call() {
    let dir = TempDir::new().unwrap();
    let engine = engine_with_library(write_library(&dir, PATHOLOGICAL_LIBRARY));
    let text = backtracking_input();

    let result = engine.analyze(&text, None);

    assert!(!result.success);
    assert!(result.error.is_some());
    assert_eq!(result.anonymized_text, "");
    assert!(result.entities.is_empty());

    assert!(matches!(
        engine.detect(&text, None),
        Err(OliError::Pipeline(_))
    ));
    assert!(engine.anonymize(&text, None).is_err());
}

#[test]
fn test_one_failing_recognizer_is_skipped() {
    let dir = TempDir::new().unwrap();
    let engine = engine_with_library(write_library(&dir, MIXED_LIBRARY));
    let text = format!("{} contact@exemple.ca", backtracking_input());

    let result = engine.analyze(&text, None);

    assert!(result.success);
    assert_eq!(result.total_entities, 1);
    assert!(result.anonymized_text.ends_with(" <EMAIL>"));
}

#[test]
fn test_invalid_regex_fails_construction() {
    let dir = TempDir::new().unwrap();
    let path = write_library(
        &dir,
        r#"
[[recognizers]]
name = "broken"
entity_type = "CUSTOM_ID"

[[recognizers.patterns]]
label = "unclosed"
regex = '(\d+'
score = 0.5
"#,
    );

    let config = AnalyzerConfig {
        recognizer_library: Some(path),
        ..AnalyzerConfig::default()
    };
    let err = AnalyzerEngine::new(config).unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("broken"));
}

#[test]
fn test_missing_library_fails_construction() {
    let config = AnalyzerConfig {
        recognizer_library: Some(PathBuf::from("/nonexistent/recognizers.toml")),
        ..AnalyzerConfig::default()
    };
    assert!(matches!(
        AnalyzerEngine::new(config),
        Err(OliError::Configuration(_))
    ));
}

#[test]
fn test_unsupported_language_fails_construction() {
    let config = AnalyzerConfig {
        languages: vec!["de".to_string()],
        ..AnalyzerConfig::default()
    };
    assert!(AnalyzerEngine::new(config).unwrap_err().is_fatal());
}

#[test]
fn test_audit_log_hashes_matched_values() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit").join("anonymization.log");

    let config = AnalyzerConfig {
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        },
        ..AnalyzerConfig::default()
    };
    let engine = AnalyzerEngine::new(config).unwrap();

    let text = "Demandeur : Sophie Martin, NAS : 123-456-789, Courriel : sophie.martin@email.com";
    let result = engine.analyze(text, None);
    assert!(result.success);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(!contents.contains("123-456-789"));
    assert!(!contents.contains("sophie.martin@email.com"));
    assert!(!contents.contains("Sophie Martin"));
    assert!(contents.contains(&hash_pii_value("123-456-789")));

    let entry: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(entry["entities_count"], 3);
    assert_eq!(entry["language"], "fr");
    assert_eq!(entry["success"], true);
}

#[test]
fn test_audit_log_records_failures() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit.log");

    let config = AnalyzerConfig {
        recognizer_library: Some(write_library(&dir, PATHOLOGICAL_LIBRARY)),
        max_backtrack_steps: 100_000,
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: false,
        },
        ..AnalyzerConfig::default()
    };
    let engine = AnalyzerEngine::new(config).unwrap();

    engine.analyze(&backtracking_input(), None);
    engine.analyze("clean text", None);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Success: false"));
    assert!(lines[1].contains("Success: true"));
}

#[test]
fn test_audit_write_failure_does_not_fail_analysis() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit.log");

    let config = AnalyzerConfig {
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        },
        ..AnalyzerConfig::default()
    };
    let engine = AnalyzerEngine::new(config).unwrap();

    // A directory in place of the log file makes every append fail
    std::fs::create_dir_all(&log_path).unwrap();

    let result = engine.analyze("NAS : 123-456-789", None);
    assert!(result.success);
    assert_eq!(result.anonymized_text, "NAS : <SIN>");
}
