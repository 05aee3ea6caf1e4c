//! Outfit scoring: per-axis sub-scores and the weighted total.
//!
//! Every axis is a value in `[0, 1]`. The total is the weighted sum of the
//! axes that were actually computed, with weights renormalised over those
//! axes, so omitting weather never pushes the total outside `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::color::{classify_palette, ColorHarmony};
use crate::error::CoreError;
use crate::style::style_matching;
use crate::wardrobe::{ClothingItem, Occasion, Season};
use crate::weather::{weather_suitability, WeatherContext};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const WEIGHT_COLOR_HARMONY: f64 = 0.30;
pub const WEIGHT_STYLE_MATCHING: f64 = 0.25;
pub const WEIGHT_OCCASION: f64 = 0.20;
pub const WEIGHT_SEASON: f64 = 0.15;
pub const WEIGHT_WEATHER: f64 = 0.10;

/// Sub-score used when an input value cannot be interpreted.
pub const UNKNOWN_SUB_SCORE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ScoringError> for CoreError {
    fn from(err: ScoringError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Optional context that sharpens the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    /// Requested occasion, e.g. `"work"`. `None` means any occasion.
    #[serde(default)]
    pub occasion: Option<String>,
    /// Target season. `None` means no seasonal constraint.
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub weather: Option<WeatherContext>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub color_harmony: f64,
    pub style_matching: f64,
    pub occasion_suitability: f64,
    pub season_suitability: f64,
    /// Present only when weather context was supplied.
    pub weather_suitability: Option<f64>,
}

impl ScoreBreakdown {
    /// Copy with every axis clamped to `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            color_harmony: self.color_harmony.clamp(0.0, 1.0),
            style_matching: self.style_matching.clamp(0.0, 1.0),
            occasion_suitability: self.occasion_suitability.clamp(0.0, 1.0),
            season_suitability: self.season_suitability.clamp(0.0, 1.0),
            weather_suitability: self.weather_suitability.map(|w| w.clamp(0.0, 1.0)),
        }
    }

    /// `(value, weight)` for every computed axis.
    pub fn weighted_axes(&self) -> Vec<(f64, f64)> {
        let mut axes = vec![
            (self.color_harmony, WEIGHT_COLOR_HARMONY),
            (self.style_matching, WEIGHT_STYLE_MATCHING),
            (self.occasion_suitability, WEIGHT_OCCASION),
            (self.season_suitability, WEIGHT_SEASON),
        ];
        if let Some(weather) = self.weather_suitability {
            axes.push((weather, WEIGHT_WEATHER));
        }
        axes
    }

    /// Weighted total renormalised over the computed axes.
    pub fn total(&self) -> f64 {
        let axes = self.weighted_axes();
        let weight_sum: f64 = axes.iter().map(|(_, w)| w).sum();
        let weighted: f64 = axes.iter().map(|(v, w)| v * w).sum();
        (weighted / weight_sum).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    /// Detected palette harmony; `None` when a color could not be parsed.
    pub harmony: Option<ColorHarmony>,
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Color axis plus the detected harmony. Unparseable colors score
/// [`UNKNOWN_SUB_SCORE`].
pub fn color_harmony_score(items: &[ClothingItem]) -> (f64, Option<ColorHarmony>) {
    let colors: Vec<&str> = items.iter().map(|i| i.color.as_str()).collect();
    match classify_palette(&colors) {
        Ok(harmony) => (harmony.score(), Some(harmony)),
        Err(_) => (UNKNOWN_SUB_SCORE, None),
    }
}

/// Fraction of items tagged with the requested occasion.
pub fn occasion_suitability(items: &[ClothingItem], occasion: Option<&str>) -> f64 {
    let Some(raw) = occasion.map(str::trim).filter(|o| !o.is_empty()) else {
        return 1.0;
    };
    match raw.parse::<Occasion>() {
        Ok(occasion) => fraction(items, |i| i.suits_occasion(occasion)),
        Err(_) => UNKNOWN_SUB_SCORE,
    }
}

/// Fraction of items valid for the target season.
pub fn season_suitability(items: &[ClothingItem], season: Option<Season>) -> f64 {
    match season {
        Some(season) => fraction(items, |i| i.fits_season(season)),
        None => 1.0,
    }
}

fn fraction(items: &[ClothingItem], pred: impl Fn(&ClothingItem) -> bool) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().filter(|i| pred(i)).count() as f64 / items.len() as f64
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Score an outfit.
///
/// Fails with [`ScoringError::InvalidInput`] for an empty outfit; never
/// fails on unknown colors or categories.
pub fn score_outfit(items: &[ClothingItem], ctx: &ScoringContext) -> Result<Score, ScoringError> {
    if items.is_empty() {
        return Err(ScoringError::InvalidInput(
            "Cannot score an empty outfit".to_string(),
        ));
    }

    let (color_harmony, harmony) = color_harmony_score(items);

    let breakdown = ScoreBreakdown {
        color_harmony,
        style_matching: style_matching(items),
        occasion_suitability: occasion_suitability(items, ctx.occasion.as_deref()),
        season_suitability: season_suitability(items, ctx.season),
        weather_suitability: ctx.weather.as_ref().map(|w| weather_suitability(items, w)),
    }
    .clamped();

    Ok(Score {
        total: breakdown.total(),
        breakdown,
        harmony,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::types::DbId;
    use crate::wardrobe::Category;
    use crate::weather::WeatherCondition;

    fn item(category: Category, color: &str) -> ClothingItem {
        ClothingItem::new(DbId::new_v4(), "Item", category, color)
    }

    fn basic_outfit() -> Vec<ClothingItem> {
        vec![
            item(Category::Tops, "#FFFFFF")
                .with_occasions([Occasion::Work])
                .with_tags(["classic"]),
            item(Category::Bottoms, "#1E3A8A")
                .with_occasions([Occasion::Work, Occasion::Casual])
                .with_tags(["business"]),
            item(Category::Shoes, "#000000").with_tags(["classic"]),
        ]
    }

    #[test]
    fn empty_outfit_is_invalid_input() {
        let result = score_outfit(&[], &ScoringContext::default());
        assert_matches!(result, Err(ScoringError::InvalidInput(_)));
    }

    #[test]
    fn total_is_renormalised_weighted_mean_without_weather() {
        let score = score_outfit(&basic_outfit(), &ScoringContext::default()).unwrap();
        let b = score.breakdown;
        assert!(b.weather_suitability.is_none());

        let expected = (b.color_harmony * WEIGHT_COLOR_HARMONY
            + b.style_matching * WEIGHT_STYLE_MATCHING
            + b.occasion_suitability * WEIGHT_OCCASION
            + b.season_suitability * WEIGHT_SEASON)
            / (WEIGHT_COLOR_HARMONY + WEIGHT_STYLE_MATCHING + WEIGHT_OCCASION + WEIGHT_SEASON);
        assert!((score.total - expected).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&score.total));
    }

    #[test]
    fn weather_axis_included_when_supplied() {
        let ctx = ScoringContext {
            weather: Some(WeatherContext {
                temperature_c: 18.0,
                condition: WeatherCondition::Sunny,
            }),
            ..Default::default()
        };
        let score = score_outfit(&basic_outfit(), &ctx).unwrap();
        let b = score.breakdown;
        let w = b.weather_suitability.expect("weather axis computed");

        let expected = (b.color_harmony * WEIGHT_COLOR_HARMONY
            + b.style_matching * WEIGHT_STYLE_MATCHING
            + b.occasion_suitability * WEIGHT_OCCASION
            + b.season_suitability * WEIGHT_SEASON
            + w * WEIGHT_WEATHER)
            / (WEIGHT_COLOR_HARMONY
                + WEIGHT_STYLE_MATCHING
                + WEIGHT_OCCASION
                + WEIGHT_SEASON
                + WEIGHT_WEATHER);
        assert!((score.total - expected).abs() < 1e-9);
    }

    #[test]
    fn occasion_is_fraction_of_matching_items() {
        let outfit = basic_outfit();
        assert!((occasion_suitability(&outfit, Some("work")) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(occasion_suitability(&outfit, Some("casual")), 1.0 / 3.0);
        assert_eq!(occasion_suitability(&outfit, None), 1.0);
        assert_eq!(occasion_suitability(&outfit, Some("  ")), 1.0);
    }

    #[test]
    fn unknown_occasion_scores_neutral() {
        assert_eq!(
            occasion_suitability(&basic_outfit(), Some("gala-brunch")),
            UNKNOWN_SUB_SCORE
        );
    }

    #[test]
    fn season_is_fraction_of_valid_items() {
        let outfit = vec![
            item(Category::Tops, "#FFFFFF").with_seasons([Season::Summer]),
            item(Category::Bottoms, "#000000").with_seasons([Season::Winter]),
        ];
        assert_eq!(season_suitability(&outfit, Some(Season::Summer)), 0.5);
        assert_eq!(season_suitability(&outfit, None), 1.0);
    }

    #[test]
    fn malformed_color_falls_back_to_neutral() {
        let outfit = vec![item(Category::Tops, "blue-ish"), item(Category::Shoes, "#000")];
        let score = score_outfit(&outfit, &ScoringContext::default()).unwrap();
        assert_eq!(score.breakdown.color_harmony, UNKNOWN_SUB_SCORE);
        assert!(score.harmony.is_none());
    }

    #[test]
    fn unknown_category_does_not_fail() {
        let outfit = vec![item(Category::Other, "#FFFFFF")];
        let ctx = ScoringContext {
            weather: Some(WeatherContext {
                temperature_c: 0.0,
                condition: WeatherCondition::Snowy,
            }),
            ..Default::default()
        };
        let score = score_outfit(&outfit, &ctx).unwrap();
        assert!((0.0..=1.0).contains(&score.total));
    }

    #[test]
    fn scoring_is_deterministic() {
        let outfit = basic_outfit();
        let ctx = ScoringContext {
            occasion: Some("work".into()),
            season: Some(Season::Fall),
            weather: None,
        };
        assert_eq!(score_outfit(&outfit, &ctx).unwrap(), score_outfit(&outfit, &ctx).unwrap());
    }

    #[test]
    fn breakdown_is_clamped() {
        let b = ScoreBreakdown {
            color_harmony: 1.4,
            style_matching: -0.2,
            occasion_suitability: 0.5,
            season_suitability: 0.5,
            weather_suitability: Some(2.0),
        }
        .clamped();
        assert_eq!(b.color_harmony, 1.0);
        assert_eq!(b.style_matching, 0.0);
        assert_eq!(b.weather_suitability, Some(1.0));
    }
}
