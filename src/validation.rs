//! Input validation for user-supplied record fields.
//!
//! The repository rejects invalid input with an explicit error instead of
//! silently dropping the operation, so callers can surface feedback.

use crate::errors::MusterError;

/// Upper bound on campaign and warrior display names, in characters.
pub const MAX_NAME_CHARS: usize = 80;

/// Validate a display name (campaign or warrior). The stored value keeps the
/// caller's whitespace; only the emptiness check trims.
pub fn validate_display_name(field: &str, value: &str) -> Result<(), MusterError> {
    if value.trim().is_empty() {
        return Err(MusterError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(MusterError::Validation(format!(
            "{field} is too long (maximum {MAX_NAME_CHARS} characters)"
        )));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(MusterError::Validation(format!(
            "{field} contains control characters"
        )));
    }
    Ok(())
}
