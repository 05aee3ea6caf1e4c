//! Saved-outfit constants and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a saved outfit's name.
pub const MAX_OUTFIT_NAME_LEN: usize = 100;
/// Maximum number of items in one saved outfit.
pub const MAX_OUTFIT_ITEMS: usize = 12;

/// How a saved outfit was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    AiGenerated,
    Manual,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::AiGenerated => "ai_generated",
            SourceType::Manual => "manual",
        }
    }

    /// Lenient parse for stored values; anything unrecognised is manual.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "ai_generated" => SourceType::AiGenerated,
            _ => SourceType::Manual,
        }
    }
}

/// Validate an outfit name: non-blank and at most [`MAX_OUTFIT_NAME_LEN`] chars.
pub fn validate_outfit_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Outfit name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_OUTFIT_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Outfit name must not exceed {MAX_OUTFIT_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the item list of an outfit being saved.
pub fn validate_outfit_items<T: PartialEq>(item_ids: &[T]) -> Result<(), CoreError> {
    if item_ids.is_empty() {
        return Err(CoreError::Validation(
            "An outfit must contain at least one item".to_string(),
        ));
    }
    if item_ids.len() > MAX_OUTFIT_ITEMS {
        return Err(CoreError::Validation(format!(
            "An outfit may contain at most {MAX_OUTFIT_ITEMS} items"
        )));
    }
    for (i, id) in item_ids.iter().enumerate() {
        if item_ids[..i].contains(id) {
            return Err(CoreError::Validation(format!(
                "Item at index {i} appears more than once"
            )));
        }
    }
    Ok(())
}
