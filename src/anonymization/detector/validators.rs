//! Programmatic validation applied after a pattern matches
//!
//! Checksums cut false positives for identifiers whose regex alone is too
//! permissive (any 16 digits look like a card number).

use serde::{Deserialize, Serialize};

/// Validator attached to a catalog pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    /// Luhn mod-10 checksum (payment cards)
    Luhn,
    /// ISO 13616 mod-97 checksum (IBAN)
    Iban,
}

impl ValidatorKind {
    /// Validate a matched string
    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::Luhn => is_valid_luhn(value),
            Self::Iban => is_valid_iban(value),
        }
    }
}

/// Luhn checksum over the digits of `value`, ignoring spaces and dashes
pub fn is_valid_luhn(value: &str) -> bool {
    let mut digits = Vec::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '0'..='9' => digits.push(c as u32 - '0' as u32),
            ' ' | '-' => continue,
            _ => return false,
        }
    }

    if digits.len() < 12 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// IBAN mod-97 check, ignoring spaces
pub fn is_valid_iban(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if compact.len() < 15 || compact.len() > 34 || !compact.is_ascii() {
        return false;
    }

    let (head, tail) = compact.split_at(4);
    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}
