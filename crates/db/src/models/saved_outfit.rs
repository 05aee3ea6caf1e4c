//! Saved outfit rows from `saved_outfits` and `outfit_items`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stylisto_core::error::CoreError;
use stylisto_core::outfit::{validate_outfit_items, validate_outfit_name, SourceType};
use stylisto_core::types::{DbId, Timestamp};

/// A row from `saved_outfits` with its ordered item ids from `outfit_items`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SavedOutfit {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub occasion: Option<String>,
    pub source_type: String,
    pub is_favorite: bool,
    pub score: Option<f64>,
    pub item_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SavedOutfit {
    pub fn source(&self) -> SourceType {
        SourceType::parse_lenient(&self.source_type)
    }
}

/// DTO for saving an outfit. Item order is preserved.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSavedOutfit {
    pub name: String,
    pub item_ids: Vec<DbId>,
    pub occasion: Option<String>,
    #[serde(default = "default_source_type")]
    pub source_type: SourceType,
    pub score: Option<f64>,
}

fn default_source_type() -> SourceType {
    SourceType::Manual
}

impl CreateSavedOutfit {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_outfit_name(&self.name)?;
        validate_outfit_items(&self.item_ids)?;
        if let Some(score) = self.score {
            if !(0.0..=1.0).contains(&score) {
                return Err(CoreError::Validation(
                    "Outfit score must be between 0 and 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Query parameters for listing saved outfits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedOutfitListParams {
    #[serde(default)]
    pub favorites_only: bool,
}

/// DTO for setting the favorite flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SetFavorite {
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn dto(name: &str, item_ids: Vec<DbId>) -> CreateSavedOutfit {
        CreateSavedOutfit {
            name: name.to_string(),
            item_ids,
            occasion: None,
            source_type: SourceType::AiGenerated,
            score: Some(0.82),
        }
    }

    #[test]
    fn valid_outfit_passes() {
        assert!(dto("Monday", vec![DbId::new_v4(), DbId::new_v4()]).validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_duplicates() {
        assert_matches!(
            dto("  ", vec![DbId::new_v4()]).validate(),
            Err(CoreError::Validation(_))
        );
        let id = DbId::new_v4();
        assert_matches!(dto("Twice", vec![id, id]).validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_out_of_range_score() {
        let mut d = dto("Scored", vec![DbId::new_v4()]);
        d.score = Some(1.5);
        assert_matches!(d.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn source_type_defaults_to_manual() {
        let d: CreateSavedOutfit = serde_json::from_str(&format!(
            r#"{{"name": "Mine", "item_ids": ["{}"]}}"#,
            DbId::new_v4()
        ))
        .unwrap();
        assert_eq!(d.source_type, SourceType::Manual);
    }
}
