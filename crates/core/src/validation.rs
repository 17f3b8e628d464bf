//! Field-level validation helpers shared by the request DTOs.
//!
//! Every helper returns [`CoreError::Validation`] with a message that names
//! the offending field, so handlers can forward it unchanged.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of short free-text fields (names, addresses).
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum length of long free-text fields (notes, descriptions).
pub const MAX_NOTES_LEN: usize = 2_000;

/// Reject empty (after trimming) or over-long text.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate optional free text: absent is fine, present must fit `max_len`.
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        ))),
        _ => Ok(()),
    }
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address '{email}'")))
    }
}

/// Canonical storage form of an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a phone number.
///
/// Accepts an optional leading `+` followed by 7 to 15 digits; spaces,
/// hyphens and parentheses are ignored.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Invalid phone number '{phone}'"
                )))
            }
        }
    }
    if !(7..=15).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "Phone number must contain 7 to 15 digits, got {digits}"
        )));
    }
    Ok(())
}

/// Validate an optional latitude/longitude pair: both or neither, in range.
pub fn validate_location(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(CoreError::Validation(format!(
                    "latitude must be between -90 and 90, got {lat}"
                )));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(CoreError::Validation(format!(
                    "longitude must be between -180 and 180, got {lon}"
                )));
            }
            Ok(())
        }
        _ => Err(CoreError::Validation(
            "latitude and longitude must be provided together".into(),
        )),
    }
}
