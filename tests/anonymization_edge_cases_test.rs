//! Edge case tests for the analyzer engine

use oli::anonymization::{AnalyzerConfig, AnalyzerEngine, Language};
use test_case::test_case;

fn create_engine() -> AnalyzerEngine {
    AnalyzerEngine::new(AnalyzerConfig::default()).expect("Failed to create engine")
}

#[test]
fn test_empty_text() {
    let engine = create_engine();
    let result = engine.analyze("", None);

    assert!(result.success);
    assert_eq!(result.anonymized_text, "");
    assert_eq!(result.total_entities, 0);
    assert!(!result.has_detections());
    assert_eq!(result.language, Language::English);
}

#[test]
fn test_text_without_pii_is_unchanged() {
    let engine = create_engine();
    let text = "Le dossier a été reçu et sera traité sous peu.";

    let result = engine.analyze(text, None);

    assert!(result.success);
    assert_eq!(result.anonymized_text, text);
    assert!(result.entities.is_empty());
}

#[test_case("Balance: $5,000" ; "short amount")]
#[test_case("Le solde est de $123456789." ; "dollar prefix")]
#[test_case("Montant : 123 456 789 $" ; "dollar suffix with spaces")]
#[test_case("Amount $1234567890" ; "ten digit amount")]
#[test_case("Total: $5,000,000.00" ; "formatted amount")]
fn test_dollar_amounts_are_not_pii(text: &str) {
    let engine = create_engine();
    assert!(engine.detect(text, None).unwrap().is_empty());
    assert_eq!(engine.anonymize(text, None).unwrap(), text);
}

#[test]
fn test_dashed_sin_next_to_dollar_sign_is_detected() {
    let engine = create_engine();
    assert_eq!(
        engine.anonymize("NAS 123-456-789 $", None).unwrap(),
        "NAS <SIN> $"
    );
}

#[test_case(
    "NAS : 123 456 789, 40 $ de frais",
    "NAS : <SIN>, 40 $ de frais" ;
    "spaced sin before unrelated amount"
)]
#[test_case(
    "Compte 1234567, 5 000 $",
    "Compte <BANK_ACCOUNT>, 5 000 $" ;
    "account before spaced amount"
)]
#[test_case(
    "Account 12345678, $500 deposit",
    "Account <BANK_ACCOUNT>, $500 deposit" ;
    "account before dollar amount"
)]
#[test_case(
    "Frais de 40 $, NAS 123 456 789",
    "Frais de 40 $, NAS <SIN>" ;
    "spaced sin after unrelated amount"
)]
fn test_pii_next_to_separate_amount_is_redacted(text: &str, expected: &str) {
    let engine = create_engine();
    let result = engine.analyze(text, None);

    assert!(result.success);
    assert_eq!(result.anonymized_text, expected);
}

#[test_case("NAS : 046454286", "NAS : <SIN>" ; "bare sin with keyword")]
#[test_case("Reference 046454286", "Reference 046454286" ; "bare sin without keyword")]
fn test_bare_sin_requires_context(text: &str, expected: &str) {
    let engine = create_engine();
    assert_eq!(engine.anonymize(text, None).unwrap(), expected);
}

#[test_case("Demandeur : Sophie Martin, NAS : 123-456-789" ; "french form")]
#[test_case("Applicant: John Smith, phone (613) 555-0199" ; "english form")]
#[test_case("Téléphone : +1 613 555 0199" ; "international phone")]
fn test_anonymization_is_idempotent(text: &str) {
    let engine = create_engine();
    let once = engine.anonymize(text, None).unwrap();
    let twice = engine.anonymize(&once, None).unwrap();
    assert_ne!(once, text);
    assert_eq!(once, twice);
}

#[test]
fn test_overlapping_phone_patterns_resolve_to_one_entity() {
    let engine = create_engine();
    let text = "Téléphone : +1 613 555 0199";

    let entities = engine.detect(text, None).unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].matched_text, "+1 613 555 0199");
    assert_eq!(
        engine.anonymize(text, None).unwrap(),
        "Téléphone : <PHONE>"
    );
}

#[test]
fn test_prefixed_uci_beats_bare_digits() {
    let engine = create_engine();
    let entities = engine.detect("Dossier UCI 12345678", None).unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity_type, "CA_UCI");
    assert_eq!(entities[0].matched_text, "UCI 12345678");
}

#[test_case("Passeport : AB123456", "Passeport : <PASSPORT>" ; "uppercase passport")]
#[test_case("passeport : ab123456", "passeport : ab123456" ; "lowercase is not a passport")]
fn test_passport_is_case_sensitive(text: &str, expected: &str) {
    let engine = create_engine();
    assert_eq!(engine.anonymize(text, None).unwrap(), expected);
}

#[test]
fn test_network_identifiers() {
    let engine = create_engine();
    assert_eq!(
        engine
            .anonymize(
                "Serveur : 192.168.1.20, site : https://exemple.ca/dossier",
                None
            )
            .unwrap(),
        "Serveur : <IP_ADDRESS>, site : <URL>"
    );
}

#[test]
fn test_invalid_card_checksum_is_ignored() {
    let engine = create_engine();
    let text = "Carte : 4111 1111 1111 1112";
    assert!(engine
        .detect(text, None)
        .unwrap()
        .iter()
        .all(|e| e.entity_type != "CREDIT_CARD"));
}

#[test]
fn test_threshold_filters_low_confidence() {
    let config = AnalyzerConfig {
        score_threshold: 0.9,
        ..AnalyzerConfig::default()
    };
    let engine = AnalyzerEngine::new(config).unwrap();

    assert_eq!(
        engine.anonymize("Ref 613-555-0199", None).unwrap(),
        "Ref 613-555-0199"
    );
    assert_eq!(
        engine.anonymize("NAS : 123-456-789", None).unwrap(),
        "NAS : <SIN>"
    );
}

#[test]
fn test_context_window_is_bounded() {
    let config = AnalyzerConfig {
        score_threshold: 0.9,
        ..AnalyzerConfig::default()
    };
    let engine = AnalyzerEngine::new(config).unwrap();

    let near = "Phone 613-555-0199";
    let far = format!("Phone{} 613-555-0199", " filler".repeat(10));

    assert_eq!(engine.anonymize(near, None).unwrap(), "Phone <PHONE>");
    assert_eq!(engine.anonymize(&far, None).unwrap(), far);
}

#[test]
fn test_very_long_document() {
    let engine = create_engine();
    let paragraph = "Le demandeur habite à Montréal depuis plusieurs années. ";
    let text = format!(
        "{}NAS : 123-456-789. {}",
        paragraph.repeat(500),
        paragraph.repeat(500)
    );

    let result = engine.analyze(&text, None);

    assert!(result.success);
    assert_eq!(result.total_entities, 1);
    assert!(result.anonymized_text.contains("NAS : <SIN>"));
    assert_eq!(
        result.anonymized_text.len(),
        text.len() - "123-456-789".len() + "<SIN>".len()
    );
}
