//! Input normalization shared by the services.

use validator::ValidateEmail;

use teamboard_core::error::AppError;
use teamboard_core::result::AppResult;

/// Trim `value` and require 1..=`max` characters.
pub(crate) fn required(field: &str, value: &str, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional value; blank becomes `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim and lower-case an email address, then check it is well formed.
pub(crate) fn email(value: &str) -> AppResult<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.chars().count() > 256 || !normalized.validate_email() {
        return Err(AppError::validation(format!("Invalid email address: '{value}'")));
    }
    Ok(normalized)
}
