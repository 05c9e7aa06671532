//! Single-pass text redaction

use super::ReplacementTokens;
use crate::anonymization::models::ResolvedEntity;
use crate::domain::{OliError, Result};

/// Rewrite `text`, replacing each entity span with its token
///
/// `entities` must be sorted by start offset and non-overlapping. Text
/// between spans is copied unchanged. A list that breaks the ordering or
/// points outside `text` is rejected instead of producing partial output.
pub fn apply(
    text: &str,
    entities: &[ResolvedEntity],
    tokens: &ReplacementTokens,
) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for entity in entities {
        if entity.start < cursor || entity.start >= entity.end {
            return Err(OliError::Pipeline(format!(
                "entity {}..{} is out of order or empty",
                entity.start, entity.end
            )));
        }

        match (text.get(cursor..entity.start), text.get(entity.start..entity.end)) {
            (Some(gap), Some(_)) => output.push_str(gap),
            _ => {
                return Err(OliError::Pipeline(format!(
                    "entity {}..{} does not fit a {}-byte text",
                    entity.start,
                    entity.end,
                    text.len()
                )))
            }
        }
        output.push_str(&tokens.token_for(&entity.entity_type));
        cursor = entity.end;
    }

    output.push_str(&text[cursor..]);
    Ok(output)
}
