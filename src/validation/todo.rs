use crate::error::{AppError, Result};
use crate::models::todo::CONTENT_MAX_CHARS;

/// Longest document id the backend generates or accepts.
const ITEM_ID_MAX_CHARS: usize = 36;

/// Validates item text and returns it trimmed.
pub fn validate_content(content: &str) -> Result<&str> {
    let content = content.trim();

    if content.is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Content must be at most {} characters",
            CONTENT_MAX_CHARS
        )));
    }

    Ok(content)
}

/// Validates a document id taken from a URL path.
///
/// Ids are spliced into backend URLs, so anything outside the backend's own
/// id alphabet is rejected rather than escaped.
pub fn validate_item_id(item_id: &str) -> Result<()> {
    let well_formed = !item_id.is_empty()
        && item_id.len() <= ITEM_ID_MAX_CHARS
        && item_id.starts_with(|c: char| c.is_ascii_alphanumeric())
        && item_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

    if !well_formed {
        return Err(AppError::NotFound);
    }

    Ok(())
}
