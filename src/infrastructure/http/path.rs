//! Identifiers placed into backend route paths

use crate::shared::{AppError, AppResult};

/// Check that `raw` can stand as one path segment.
///
/// Separators, query and fragment markers, escapes, whitespace and dot
/// segments are refused so an identifier can never address another route.
pub fn path_segment<'a>(field: &'static str, raw: &'a str) -> AppResult<&'a str> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(AppError::validation(field, "Identifier is required"));
    }
    let reserved = |c: char| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    };
    if id == "." || id == ".." || id.chars().any(reserved) {
        return Err(AppError::validation(
            field,
            format!("Identifier {:?} contains characters that are not allowed", id),
        ));
    }
    Ok(id)
}
