//! Recommendation card view model and the deck of ranked outfits behind it.

use serde::Serialize;

use crate::generator::GeneratedOutfit;
use crate::swipe::SwipeDecision;

// ---------------------------------------------------------------------------
// Match labels
// ---------------------------------------------------------------------------

pub const EXCELLENT_MATCH_MIN: f64 = 0.85;
pub const GREAT_MATCH_MIN: f64 = 0.70;
pub const GOOD_MATCH_MIN: f64 = 0.50;

/// Headline label for a total score.
pub fn match_label(total: f64) -> &'static str {
    if total >= EXCELLENT_MATCH_MIN {
        "Excellent match"
    } else if total >= GREAT_MATCH_MIN {
        "Great match"
    } else if total >= GOOD_MATCH_MIN {
        "Good match"
    } else {
        "Fair match"
    }
}

/// Score as a whole percentage in `0..=100`.
pub fn percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Save,
    Refresh,
    Share,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardItem {
    pub id: crate::types::DbId,
    pub name: String,
    pub category: &'static str,
    pub image_url: Option<String>,
}

/// Everything the recommendation card renders for one outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitCard {
    pub headline: &'static str,
    pub total_percent: u8,
    pub harmony: Option<&'static str>,
    pub breakdown: Vec<BreakdownRow>,
    pub items: Vec<CardItem>,
    pub actions: Vec<CardAction>,
}

impl OutfitCard {
    pub fn from_outfit(outfit: &GeneratedOutfit) -> Self {
        let score = &outfit.score;
        let b = &score.breakdown;

        let mut breakdown = vec![
            BreakdownRow {
                label: "Color harmony",
                percent: percent(b.color_harmony),
            },
            BreakdownRow {
                label: "Style matching",
                percent: percent(b.style_matching),
            },
            BreakdownRow {
                label: "Occasion",
                percent: percent(b.occasion_suitability),
            },
            BreakdownRow {
                label: "Season",
                percent: percent(b.season_suitability),
            },
        ];
        if let Some(weather) = b.weather_suitability {
            breakdown.push(BreakdownRow {
                label: "Weather",
                percent: percent(weather),
            });
        }

        Self {
            headline: match_label(score.total),
            total_percent: percent(score.total),
            harmony: score.harmony.map(|h| h.label()),
            breakdown,
            items: outfit
                .items
                .iter()
                .map(|i| CardItem {
                    id: i.id,
                    name: i.name.clone(),
                    category: i.category.as_str(),
                    image_url: i.image_url.clone(),
                })
                .collect(),
            actions: vec![CardAction::Save, CardAction::Refresh, CardAction::Share],
        }
    }

    /// Text for the platform share sheet.
    pub fn share_text(&self) -> String {
        let names: Vec<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        format!(
            "Check out my outfit: {} ({}% {}) - styled with Stylisto",
            names.join(", "),
            self.total_percent,
            self.headline.to_lowercase(),
        )
    }
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// Cursor over ranked outfits. Liked outfits are collected for saving;
/// skipped ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct RecommendationDeck {
    outfits: Vec<GeneratedOutfit>,
    position: usize,
    liked: Vec<GeneratedOutfit>,
}

impl RecommendationDeck {
    pub fn new(outfits: Vec<GeneratedOutfit>) -> Self {
        Self {
            outfits,
            position: 0,
            liked: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&GeneratedOutfit> {
        self.outfits.get(self.position)
    }

    pub fn current_card(&self) -> Option<OutfitCard> {
        self.current().map(OutfitCard::from_outfit)
    }

    pub fn remaining(&self) -> usize {
        self.outfits.len().saturating_sub(self.position)
    }

    pub fn liked(&self) -> &[GeneratedOutfit] {
        &self.liked
    }

    /// Apply a committed swipe to the current card and move on.
    pub fn apply(&mut self, decision: SwipeDecision) -> Option<&GeneratedOutfit> {
        let current = self.outfits.get(self.position)?.clone();
        if decision == SwipeDecision::Like {
            self.liked.push(current);
        }
        self.position += 1;
        self.current()
    }

    /// Replace the deck with a fresh ranking, keeping liked outfits.
    pub fn refresh(&mut self, outfits: Vec<GeneratedOutfit>) {
        self.outfits = outfits;
        self.position = 0;
    }
}
