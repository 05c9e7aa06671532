//! Anonymization module
//!
//! Maps entity types to replacement tokens and rewrites text in a single
//! pass over the resolved entity list.

pub mod redaction;

use crate::anonymization::models::entity_types;
use std::collections::HashMap;

pub use redaction::apply;

/// Built-in replacement tokens
pub const DEFAULT_TOKENS: &[(&str, &str)] = &[
    (entity_types::PERSON, "<PERSON>"),
    (entity_types::PHONE_NUMBER, "<PHONE>"),
    (entity_types::EMAIL_ADDRESS, "<EMAIL>"),
    (entity_types::CREDIT_CARD, "<CREDIT_CARD>"),
    (entity_types::DATE_TIME, "<DATE>"),
    (entity_types::LOCATION, "<LOCATION>"),
    (entity_types::IBAN_CODE, "<IBAN>"),
    (entity_types::IP_ADDRESS, "<IP_ADDRESS>"),
    (entity_types::URL, "<URL>"),
    (entity_types::CA_SIN, "<SIN>"),
    (entity_types::CA_POSTAL_CODE, "<POSTAL_CODE>"),
    (entity_types::CA_UCI, "<UCI>"),
    (entity_types::CA_PASSPORT, "<PASSPORT>"),
    (entity_types::BANK_ACCOUNT, "<BANK_ACCOUNT>"),
];

/// Immutable entity type to token map
#[derive(Debug, Clone)]
pub struct ReplacementTokens {
    tokens: HashMap<String, String>,
}

impl ReplacementTokens {
    /// Built-in tokens with `custom` merged over them
    pub fn new(custom: &HashMap<String, String>) -> Self {
        let mut tokens: HashMap<String, String> = DEFAULT_TOKENS
            .iter()
            .map(|(entity_type, token)| (entity_type.to_string(), token.to_string()))
            .collect();
        tokens.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { tokens }
    }

    /// Token for `entity_type`, `<entity_type>` when unmapped
    pub fn token_for(&self, entity_type: &str) -> String {
        self.tokens
            .get(entity_type)
            .cloned()
            .unwrap_or_else(|| format!("<{entity_type}>"))
    }
}

impl Default for ReplacementTokens {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}
