//! Input checks shared by the services.

use crate::error::{StoreError, StoreResult};

pub use shared::MAX_ITCH_LEVEL;
pub const MAX_PET_NAME_LENGTH: usize = 100;

pub fn validate_itch_level(itch_level: u8) -> StoreResult<()> {
    if itch_level > MAX_ITCH_LEVEL {
        return Err(StoreError::ItchLevelOutOfRange(itch_level));
    }
    Ok(())
}

/// Trim `value` and reject it if empty or longer than `max` characters
pub fn required_text(field: &'static str, value: &str, max: usize) -> StoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    if trimmed.chars().count() > max {
        return Err(StoreError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Blank notes become None
pub fn optional_text(field: &'static str, value: Option<String>, max: usize) -> StoreResult<Option<String>> {
    match value {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > max {
                return Err(StoreError::TooLong { field, max });
            }
            Ok(Some(text))
        }
        _ => Ok(None),
    }
}
