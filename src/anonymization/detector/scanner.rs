//! Candidate scanning over the recognizer catalog

use super::patterns::Recognizer;
use crate::anonymization::models::{CandidateSpan, DetectionMethod};
use crate::domain::{OliError, Result};

/// Characters that may appear inside a bare monetary amount
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || is_amount_separator(c)
}

/// Thousands or decimal separators
fn is_amount_separator(c: char) -> bool {
    matches!(c, ',' | '.' | ' ' | '\u{a0}' | '\u{202f}')
}

fn is_amount_gap(c: char) -> bool {
    matches!(c, ' ' | '\u{a0}' | '\u{202f}')
}

/// Extend `chars` (read outward from a span edge) over the rest of the
/// number. A separator is crossed only when a digit sits on both sides of
/// it, so `, ` or a lone space ends the token. Returns the first
/// character past the token.
fn amount_token_boundary(
    edge: Option<char>,
    mut chars: impl Iterator<Item = char>,
) -> Option<char> {
    let mut inner = edge;
    let mut next = chars.next();
    loop {
        match next {
            Some(c) if c.is_ascii_digit() => {
                inner = Some(c);
                next = chars.next();
            }
            Some(c) if is_amount_separator(c) && inner.is_some_and(|i| i.is_ascii_digit()) => {
                let after = chars.next();
                if after.is_some_and(|a| a.is_ascii_digit()) {
                    inner = after;
                    next = chars.next();
                } else {
                    // A single gap may still separate the token from `$`
                    return match after {
                        Some('$') if is_amount_gap(c) => Some('$'),
                        _ => Some(c),
                    };
                }
            }
            other => return other,
        }
    }
}

/// Check whether the span `[start, end)` is part of a `$` amount
///
/// Only spans made of digits and separators qualify. The number token
/// holding the span must touch a `$` sign on either side, directly or
/// across a single space.
pub fn is_monetary_amount(text: &str, start: usize, end: usize) -> bool {
    let Some(span) = text.get(start..end) else {
        return false;
    };
    if !span.chars().any(|c| c.is_ascii_digit()) || !span.chars().all(is_amount_char) {
        return false;
    }

    let before = amount_token_boundary(span.chars().next(), text[..start].chars().rev());
    let after = amount_token_boundary(span.chars().next_back(), text[end..].chars());

    before == Some('$') || after == Some('$')
}

/// Outcome of a scan over all recognizers
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Raw candidates at base score
    pub candidates: Vec<CandidateSpan>,
    /// Recognizers skipped because matching failed
    pub failed_recognizers: Vec<String>,
}

/// Applies every recognizer's patterns to a text
#[derive(Debug, Default, Clone, Copy)]
pub struct CandidateScanner;

impl CandidateScanner {
    /// Create a new scanner
    pub fn new() -> Self {
        Self
    }

    /// Scan `text` with every recognizer
    ///
    /// A recognizer that fails at match time contributes no candidates
    /// and is reported in [`ScanOutcome::failed_recognizers`].
    pub fn scan(&self, text: &str, recognizers: &[Recognizer]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for recognizer in recognizers {
            match self.scan_recognizer(text, recognizer) {
                Ok(candidates) => outcome.candidates.extend(candidates),
                Err(e) => {
                    tracing::warn!(
                        recognizer = %recognizer.name,
                        error = %e,
                        "Recognizer failed, skipping its candidates"
                    );
                    outcome.failed_recognizers.push(recognizer.name.clone());
                }
            }
        }

        outcome
    }

    /// Scan `text` with a single recognizer
    pub fn scan_recognizer(
        &self,
        text: &str,
        recognizer: &Recognizer,
    ) -> Result<Vec<CandidateSpan>> {
        let mut candidates = Vec::new();

        for pattern in &recognizer.patterns {
            for captures in pattern.regex.captures_iter(text) {
                let captures = captures.map_err(|e| {
                    OliError::recognizer(
                        &recognizer.name,
                        format!("pattern '{}' failed: {e}", pattern.label),
                    )
                })?;

                let Some(matched) = captures.get(pattern.capture_group) else {
                    continue;
                };

                if let Some(validator) = pattern.validator {
                    if !validator.validate(matched.as_str()) {
                        continue;
                    }
                }

                if is_monetary_amount(text, matched.start(), matched.end()) {
                    continue;
                }

                if let Some(candidate) = CandidateSpan::from_text(
                    text,
                    recognizer.entity_type.as_str(),
                    matched.start(),
                    matched.end(),
                    pattern.score,
                    recognizer.name.as_str(),
                    DetectionMethod::Pattern,
                ) {
                    candidates.push(candidate);
                }
            }
        }

        Ok(candidates)
    }
}
