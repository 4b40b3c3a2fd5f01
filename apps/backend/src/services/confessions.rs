//! Confession editing rules.

use sea_orm::ConnectionTrait;
use tracing::info;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::confessions::{self, Confession};

pub const MAX_CONTENT_CHARS: usize = 5000;

/// Trimmed NFC content, or a validation error when empty or too long.
pub fn validate_content(content: &str) -> Result<String, DomainError> {
    let normalized: String = content.trim().nfc().collect();
    let trimmed = normalized.as_str();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Content cannot be empty"));
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::validation(format!(
            "Content must be at most {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Replace the content of `confession_id` on behalf of `editor_id`.
///
/// The owner check happens before any write; a non-owner gets `Forbidden`
/// and the row is left untouched.
pub async fn edit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    editor_id: Uuid,
    confession_id: Uuid,
    content: &str,
) -> Result<Confession, DomainError> {
    let content = validate_content(content)?;

    let existing = confessions::find_by_id(conn, confession_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Confession, "Confession not found"))?;

    if existing.user_id != editor_id {
        return Err(DomainError::forbidden(
            "You can only edit your own confessions",
        ));
    }

    let updated = confessions::update_content(conn, existing, content).await?;
    info!(confession_id = %confession_id, "confession edited");
    Ok(updated)
}
