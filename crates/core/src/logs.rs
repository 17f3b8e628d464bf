//! System log levels and entry validation.

use crate::error::CoreError;

pub const LEVEL_ERROR: &str = "error";
pub const LEVEL_WARN: &str = "warn";
pub const LEVEL_INFO: &str = "info";
pub const LEVEL_DEBUG: &str = "debug";

/// All accepted log levels, most severe first.
pub const VALID_LEVELS: &[&str] = &[LEVEL_ERROR, LEVEL_WARN, LEVEL_INFO, LEVEL_DEBUG];

/// Maximum length of a log message.
pub const MAX_MESSAGE_LEN: usize = 4_000;

/// Validate a log level.
pub fn validate_level(level: &str) -> Result<(), CoreError> {
    if VALID_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid log level '{level}'. Must be one of: {}",
            VALID_LEVELS.join(", ")
        )))
    }
}

/// Validate a log message and optional structured context.
///
/// The context, when present, must be a JSON object so it can be filtered
/// and rendered as key/value pairs.
pub fn validate_entry(
    level: &str,
    message: &str,
    context: Option<&serde_json::Value>,
) -> Result<(), CoreError> {
    validate_level(level)?;
    crate::validation::require_text("message", message, MAX_MESSAGE_LEN)?;
    if let Some(ctx) = context {
        if !ctx.is_object() {
            return Err(CoreError::Validation(
                "context must be a JSON object".into(),
            ));
        }
    }
    Ok(())
}

/// Pick the client address from an `x-forwarded-for` header value.
///
/// The first hop is the originating client.
pub fn client_ip_from_forwarded(header: &str) -> Option<String> {
    header
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
