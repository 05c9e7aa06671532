//! Overlap conflict resolution

use crate::anonymization::models::{CandidateSpan, ResolvedEntity};
use std::cmp::Ordering;

/// Tolerance for score comparisons
///
/// Sums such as `0.3 + 0.4` must land on a `0.7` threshold.
pub const SCORE_EPSILON: f32 = 1e-6;

/// Turns overlapping candidates into a sorted, non-overlapping entity list
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanResolver;

impl SpanResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve `candidates` against `score_threshold`
    ///
    /// Candidates are swept by start offset (ties: higher score, then
    /// longer span). A candidate overlapping the last accepted entity
    /// replaces it only when its score is strictly higher and it does not
    /// reach back into the entity accepted before that one.
    pub fn resolve(
        &self,
        candidates: Vec<CandidateSpan>,
        score_threshold: f32,
    ) -> Vec<ResolvedEntity> {
        let mut kept: Vec<CandidateSpan> = candidates
            .into_iter()
            .filter(|c| !c.is_empty() && c.score + SCORE_EPSILON >= score_threshold)
            .collect();

        kept.sort_by(Self::sweep_order);

        let mut accepted: Vec<CandidateSpan> = Vec::with_capacity(kept.len());
        for candidate in kept {
            let Some(last) = accepted.last() else {
                accepted.push(candidate);
                continue;
            };

            if candidate.start >= last.end {
                accepted.push(candidate);
                continue;
            }

            let clears_previous =
                accepted.len() < 2 || candidate.start >= accepted[accepted.len() - 2].end;
            if candidate.score > last.score + SCORE_EPSILON && clears_previous {
                let idx = accepted.len() - 1;
                accepted[idx] = candidate;
            }
        }

        accepted.sort_by_key(|c| c.start);
        accepted.into_iter().map(ResolvedEntity::from).collect()
    }

    fn sweep_order(a: &CandidateSpan, b: &CandidateSpan) -> Ordering {
        a.start
            .cmp(&b.start)
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| b.len().cmp(&a.len()))
    }
}

/// Check the sorted, non-overlapping invariant
pub fn is_well_formed(entities: &[ResolvedEntity]) -> bool {
    entities.iter().all(|e| e.start < e.end)
        && entities.windows(2).all(|pair| pair[0].end <= pair[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::DetectionMethod;

    fn span(text: &str, entity_type: &str, start: usize, end: usize, score: f32) -> CandidateSpan {
        CandidateSpan::from_text(
            text,
            entity_type,
            start,
            end,
            score,
            entity_type.to_lowercase(),
            DetectionMethod::Pattern,
        )
        .unwrap()
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let text = "123456789";
        let resolved = SpanResolver::new().resolve(vec![span(text, "CA_SIN", 0, 9, 0.4)], 0.7);
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let text = "1234567";
        let resolved =
            SpanResolver::new().resolve(vec![span(text, "BANK_ACCOUNT", 0, 7, 0.3 + 0.4)], 0.7);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_sin_outranks_bank_account_on_same_digits() {
        let text = "123-456-789";
        let resolved = SpanResolver::new().resolve(
            vec![
                span(text, "BANK_ACCOUNT", 0, 3, 0.7),
                span(text, "CA_SIN", 0, 11, 0.95),
            ],
            0.7,
        );
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].entity_type, "CA_SIN");
        assert_eq!((resolved[0].start, resolved[0].end), (0, 11));
    }

    #[test]
    fn test_equal_scores_prefer_longer_span() {
        let text = "+1 (514) 555-1234";
        let resolved = SpanResolver::new().resolve(
            vec![
                span(text, "PHONE_NUMBER", 3, 17, 1.0),
                span(text, "PHONE_NUMBER", 0, 17, 1.0),
            ],
            0.7,
        );
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].start, 0);
        assert_eq!(resolved[0].matched_text, text);
    }

    #[test]
    fn test_strictly_higher_overlap_replaces_last() {
        let text = "0123456789";
        let resolved = SpanResolver::new().resolve(
            vec![span(text, "A", 0, 6, 0.75), span(text, "B", 4, 10, 0.9)],
            0.7,
        );
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].entity_type, "B");
    }

    #[test]
    fn test_replacement_keeps_earlier_entities() {
        let text = "0123456789abcdef";
        let resolved = SpanResolver::new().resolve(
            vec![
                span(text, "A", 0, 4, 0.8),
                span(text, "B", 4, 8, 0.75),
                span(text, "C", 6, 10, 0.99),
                span(text, "D", 9, 12, 0.9),
            ],
            0.7,
        );
        let types: Vec<_> = resolved.iter().map(|e| e.entity_type.as_str()).collect();
        assert_eq!(types, vec!["A", "C"]);
        assert!(is_well_formed(&resolved));
    }

    #[test]
    fn test_output_is_sorted_and_disjoint() {
        let text = "aaaa bbbb cccc dddd";
        let resolved = SpanResolver::new().resolve(
            vec![
                span(text, "X", 15, 19, 0.9),
                span(text, "X", 0, 4, 0.9),
                span(text, "Y", 2, 7, 0.8),
                span(text, "X", 10, 14, 0.9),
                span(text, "X", 5, 9, 0.9),
            ],
            0.7,
        );
        assert!(is_well_formed(&resolved));
        let starts: Vec<_> = resolved.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![0, 5, 10, 15]);
    }

    #[test]
    fn test_duplicate_span_kept_once() {
        let text = "Full Name: John Doe";
        let resolved = SpanResolver::new().resolve(
            vec![
                span(text, "PERSON", 11, 19, 0.85),
                span(text, "PERSON", 11, 19, 0.85),
            ],
            0.7,
        );
        assert_eq!(resolved.len(), 1);
    }
}
