//! Wardrobe item rows from the `items` table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stylisto_core::types::{DbId, Timestamp};
use stylisto_core::wardrobe::{Category, ClothingItem, Occasion, Season};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `items` table.
///
/// Enum-like columns are kept as raw text; conversion to the domain type is
/// lenient so one malformed row never breaks a wardrobe fetch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemRow {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub season: Vec<String>,
    pub occasion: Vec<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub times_worn: i32,
    pub last_worn: Option<Timestamp>,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ItemRow {
    /// Convert to the scorer's item type.
    ///
    /// Unknown categories become [`Category::Other`], unknown season and
    /// occasion values are dropped, and a missing color becomes an empty
    /// string (which scores as an unknown palette).
    pub fn into_clothing_item(self) -> ClothingItem {
        ClothingItem {
            id: self.id,
            name: self.name,
            category: Category::parse_lenient(&self.category),
            subcategory: self.subcategory,
            color: self.color.unwrap_or_default(),
            brand: self.brand,
            size: self.size,
            season: parse_set::<Season>(&self.season),
            occasion: parse_set::<Occasion>(&self.occasion),
            image_url: self.image_url,
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            is_favorite: self.is_favorite,
            times_worn: u32::try_from(self.times_worn).unwrap_or(0),
            last_worn: self.last_worn,
            price: self.price,
            notes: self.notes,
        }
    }
}

fn parse_set<T: std::str::FromStr + Ord>(values: &[String]) -> BTreeSet<T> {
    values.iter().filter_map(|v| v.trim().parse().ok()).collect()
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for marking a set of items as worn.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordWear {
    pub item_ids: Vec<DbId>,
    /// Defaults to now when omitted.
    pub worn_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row() -> ItemRow {
        ItemRow {
            id: DbId::new_v4(),
            user_id: DbId::new_v4(),
            name: "Wool coat".to_string(),
            category: "outerwear".to_string(),
            subcategory: Some("coat".to_string()),
            color: Some("#1F2A44".to_string()),
            brand: None,
            size: Some("M".to_string()),
            season: vec!["winter".to_string(), "autumn".to_string(), "monsoon".to_string()],
            occasion: vec!["work".to_string(), "brunch".to_string()],
            image_url: None,
            tags: vec![" Classic ".to_string(), "".to_string()],
            is_favorite: true,
            times_worn: 3,
            last_worn: None,
            price: Some(129.0),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn converts_known_values() {
        let item = row().into_clothing_item();
        assert_eq!(item.category, Category::Outerwear);
        assert_eq!(
            item.season,
            BTreeSet::from([Season::Fall, Season::Winter])
        );
        assert_eq!(item.occasion, BTreeSet::from([Occasion::Work]));
        assert_eq!(item.tags, BTreeSet::from(["classic".to_string()]));
        assert_eq!(item.times_worn, 3);
    }

    #[test]
    fn tolerates_bad_values() {
        let mut r = row();
        r.category = "jumpsuits".to_string();
        r.color = None;
        r.times_worn = -4;
        let item = r.into_clothing_item();
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.color, "");
        assert_eq!(item.times_worn, 0);
    }
}
