//! Heuristic French/English language classification
//!
//! The classifier decides which detectors run for a piece of text: French
//! text never reaches the statistical NER provider.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Languages understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English (`en`)
    #[serde(rename = "en")]
    English,
    /// French (`fr`)
    #[serde(rename = "fr")]
    French,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "fr" | "french" | "français" | "francais" => Ok(Self::French),
            other => Err(format!("Unsupported language '{other}'. Must be one of: en, fr")),
        }
    }
}

const FRENCH_INDICATORS: &[&str] = &[
    "le", "la", "les", "de", "du", "des", "un", "une", "au", "aux", "ce", "cette", "ces", "mon",
    "ma", "mes", "son", "sa", "ses", "est", "sont", "être", "avoir", "fait", "peut", "doit",
    "veut", "habite", "travaille", "comme", "et", "ou", "mais", "donc", "car", "que", "qui",
    "dans", "pour", "sur", "avec", "sans", "chez", "entre", "vers", "par", "nom", "prénom",
    "adresse", "numéro", "demandeur", "dossier", "montant", "solde", "relevé", "bancaire",
    "courriel", "téléphone", "canadienne", "canadien", "citoyenne", "citoyen", "ingénieur", "à",
    "où", "né", "née", "émission",
];

const ENGLISH_INDICATORS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do",
    "does", "did", "will", "would", "can", "could", "should", "may", "might", "must", "and",
    "or", "but", "if", "then", "because", "when", "where", "what", "which", "who", "how", "this",
    "that", "these", "those", "in", "on", "at", "to", "for", "with", "from", "by", "about",
];

const FRENCH_ACCENTS: &[char] = &[
    'é', 'è', 'ê', 'ë', 'à', 'â', 'ä', 'ù', 'û', 'ü', 'ô', 'ö', 'î', 'ï', 'ç',
];

/// Accent occurrences count double towards French
const ACCENT_WEIGHT: usize = 2;

/// Raw accent count that forces French regardless of word counts
const ACCENT_DECISIVE_COUNT: usize = 2;

/// Word-list and accent based classifier
///
/// Deterministic and stateless; ties and empty input resolve to English.
#[derive(Debug, Clone, Default)]
pub struct LanguageClassifier;

impl LanguageClassifier {
    /// Create a new classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify text as French or English
    pub fn classify(&self, text: &str) -> Language {
        let lowered = text.to_lowercase();

        let words: HashSet<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
            .collect();

        let mut french_count = FRENCH_INDICATORS
            .iter()
            .filter(|w| words.contains(*w))
            .count();
        let english_count = ENGLISH_INDICATORS
            .iter()
            .filter(|w| words.contains(*w))
            .count();

        let accents = lowered.chars().filter(|c| FRENCH_ACCENTS.contains(c)).count();
        french_count += accents * ACCENT_WEIGHT;

        if french_count > english_count || accents >= ACCENT_DECISIVE_COUNT {
            Language::French
        } else {
            Language::English
        }
    }
}
