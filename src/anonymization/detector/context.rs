//! Context keyword scoring

use super::patterns::Recognizer;
use crate::anonymization::config::ContextConfig;
use crate::anonymization::models::CandidateSpan;

/// Raises candidate scores when a context keyword precedes the match
#[derive(Debug, Clone, Copy)]
pub struct ContextScorer {
    window_chars: usize,
    boost: f32,
}

impl ContextScorer {
    /// Create a scorer inspecting `window_chars` characters before a match
    pub fn new(window_chars: usize, boost: f32) -> Self {
        Self {
            window_chars,
            boost: boost.clamp(0.0, 1.0),
        }
    }

    /// Adjusted score for `candidate`, capped at 1.0
    pub fn score(&self, candidate: &CandidateSpan, text: &str, recognizer: &Recognizer) -> f32 {
        let window = self.window_before(text, candidate.start);
        if !window.is_empty() && recognizer.has_context_keyword(window) {
            (candidate.score + self.boost).min(1.0)
        } else {
            candidate.score
        }
    }

    /// Up to `window_chars` characters ending at byte offset `start`
    pub fn window_before<'t>(&self, text: &'t str, start: usize) -> &'t str {
        let Some(prefix) = text.get(..start) else {
            return "";
        };
        if self.window_chars == 0 {
            return "";
        }

        let from = prefix
            .char_indices()
            .rev()
            .nth(self.window_chars - 1)
            .map_or(0, |(idx, _)| idx);
        &prefix[from..]
    }
}

impl From<&ContextConfig> for ContextScorer {
    fn from(config: &ContextConfig) -> Self {
        Self::new(config.window_chars, config.boost)
    }
}

impl Default for ContextScorer {
    fn default() -> Self {
        Self::from(&ContextConfig::default())
    }
}
