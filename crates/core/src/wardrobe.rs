//! Wardrobe item types shared by the scorer, generator and storage layers.
//!
//! Category, season and occasion values are stored as lowercase strings in
//! the hosted store. Unknown categories deserialize to [`Category::Other`]
//! so a single bad row never breaks a wardrobe fetch.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Garment category. One outfit slot is filled per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
    /// Any stored value this build does not recognise.
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Outerwear,
        Category::Shoes,
        Category::Accessories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Other => "other",
        }
    }

    /// Lenient parse used when reading rows: unknown values map to `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Category::Other)
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tops" | "top" => Ok(Category::Tops),
            "bottoms" | "bottom" => Ok(Category::Bottoms),
            "dresses" | "dress" => Ok(Category::Dresses),
            "outerwear" => Ok(Category::Outerwear),
            "shoes" => Ok(Category::Shoes),
            "accessories" | "accessory" => Ok(Category::Accessories),
            other => Err(CoreError::Validation(format!(
                "Unknown category '{other}'. Valid categories: {}",
                Category::ALL.map(Category::as_str).join(", ")
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
    AllSeason,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::AllSeason => "all_season",
        }
    }

    /// Northern-hemisphere meteorological season for a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl FromStr for Season {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            "all_season" | "all-season" | "all" => Ok(Season::AllSeason),
            other => Err(CoreError::Validation(format!("Unknown season '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Occasion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Casual,
    Work,
    Formal,
    Party,
    Sport,
    Date,
    Travel,
}

impl Occasion {
    pub fn as_str(self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Work => "work",
            Occasion::Formal => "formal",
            Occasion::Party => "party",
            Occasion::Sport => "sport",
            Occasion::Date => "date",
            Occasion::Travel => "travel",
        }
    }
}

impl FromStr for Occasion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "casual" => Ok(Occasion::Casual),
            "work" | "business" => Ok(Occasion::Work),
            "formal" => Ok(Occasion::Formal),
            "party" => Ok(Occasion::Party),
            "sport" | "sports" => Ok(Occasion::Sport),
            "date" => Ok(Occasion::Date),
            "travel" => Ok(Occasion::Travel),
            other => Err(CoreError::Validation(format!("Unknown occasion '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// ClothingItem
// ---------------------------------------------------------------------------

/// A single garment in a user's wardrobe.
///
/// Read-only from the scorer's perspective; mutations happen in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: DbId,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Hex color, e.g. `#1A2B3C`.
    pub color: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub season: BTreeSet<Season>,
    #[serde(default)]
    pub occasion: BTreeSet<Occasion>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub times_worn: u32,
    #[serde(default)]
    pub last_worn: Option<Timestamp>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClothingItem {
    /// Minimal item with empty season/occasion/tag sets.
    pub fn new(id: DbId, name: impl Into<String>, category: Category, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            subcategory: None,
            color: color.into(),
            brand: None,
            size: None,
            season: BTreeSet::new(),
            occasion: BTreeSet::new(),
            image_url: None,
            tags: BTreeSet::new(),
            is_favorite: false,
            times_worn: 0,
            last_worn: None,
            price: None,
            notes: None,
        }
    }

    pub fn with_seasons(mut self, seasons: impl IntoIterator<Item = Season>) -> Self {
        self.season = seasons.into_iter().collect();
        self
    }

    pub fn with_occasions(mut self, occasions: impl IntoIterator<Item = Occasion>) -> Self {
        self.occasion = occasions.into_iter().collect();
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_times_worn(mut self, times_worn: u32) -> Self {
        self.times_worn = times_worn;
        self
    }

    /// An item with no season tags, or tagged `all_season`, fits any season.
    pub fn fits_season(&self, season: Season) -> bool {
        self.season.is_empty()
            || self.season.contains(&Season::AllSeason)
            || season == Season::AllSeason
            || self.season.contains(&season)
    }

    /// True when the item carries only the given season (ignoring `all_season`).
    pub fn is_only_for(&self, season: Season) -> bool {
        !self.season.contains(&Season::AllSeason)
            && !self.season.is_empty()
            && self.season.iter().all(|s| *s == season)
    }

    pub fn suits_occasion(&self, occasion: Occasion) -> bool {
        self.occasion.contains(&occasion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Category) -> ClothingItem {
        ClothingItem::new(DbId::new_v4(), "Test", category, "#000000")
    }

    #[test]
    fn category_parses_singular_and_plural() {
        assert_eq!("top".parse::<Category>().unwrap(), Category::Tops);
        assert_eq!("Dresses".parse::<Category>().unwrap(), Category::Dresses);
        assert!("hats".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_category_deserializes_to_other() {
        let c: Category = serde_json::from_str("\"swimwear\"").unwrap();
        assert_eq!(c, Category::Other);
        assert_eq!(Category::parse_lenient("swimwear"), Category::Other);
    }

    #[test]
    fn season_for_date_uses_northern_hemisphere() {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 15).unwrap();
        assert_eq!(Season::for_date(d(1)), Season::Winter);
        assert_eq!(Season::for_date(d(4)), Season::Spring);
        assert_eq!(Season::for_date(d(7)), Season::Summer);
        assert_eq!(Season::for_date(d(10)), Season::Fall);
        assert_eq!(Season::for_date(d(12)), Season::Winter);
    }

    #[test]
    fn autumn_alias_accepted() {
        let s: Season = serde_json::from_str("\"autumn\"").unwrap();
        assert_eq!(s, Season::Fall);
        assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Fall);
    }

    #[test]
    fn untagged_item_fits_every_season() {
        let it = item(Category::Tops);
        assert!(it.fits_season(Season::Winter));
        assert!(it.fits_season(Season::Summer));
    }

    #[test]
    fn tagged_item_fits_only_its_seasons() {
        let it = item(Category::Tops).with_seasons([Season::Summer, Season::Spring]);
        assert!(it.fits_season(Season::Summer));
        assert!(!it.fits_season(Season::Winter));
        assert!(!it.is_only_for(Season::Summer));

        let all = item(Category::Tops).with_seasons([Season::AllSeason]);
        assert!(all.fits_season(Season::Winter));
    }

    #[test]
    fn item_deserializes_with_defaults() {
        let json = serde_json::json!({
            "id": "6f2b3c1e-8a3d-4d8f-9a8e-0c7b1f6d2a10",
            "name": "White tee",
            "category": "tops",
            "color": "#FFFFFF",
        });
        let it: ClothingItem = serde_json::from_value(json).unwrap();
        assert!(it.season.is_empty());
        assert_eq!(it.times_worn, 0);
        assert!(!it.is_favorite);
    }
}
