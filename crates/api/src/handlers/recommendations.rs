//! Outfit recommendation and stateless scoring handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stylisto_core::card::{match_label, OutfitCard};
use stylisto_core::generator::{default_templates, generate_outfits, GeneratedOutfit, GeneratorConfig};
use stylisto_core::scoring::{score_outfit, Score, ScoringContext};
use stylisto_core::wardrobe::{ClothingItem, Season};
use stylisto_core::weather::WeatherContext;

use crate::error::AppResult;
use crate::handlers::items::load_wardrobe;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on `max_results` accepted from clients.
const MAX_RESULTS_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub occasion: Option<String>,
    /// Defaults to the current season when omitted.
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub weather: Option<WeatherContext>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl RecommendationRequest {
    /// Scoring context for a request made on `today`.
    fn context(&self, today: NaiveDate) -> ScoringContext {
        ScoringContext {
            occasion: self.occasion.clone(),
            season: Some(self.season.unwrap_or_else(|| Season::for_date(today))),
            weather: self.weather,
        }
    }

    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(n) = self.max_results {
            config.max_results = n.clamp(1, MAX_RESULTS_LIMIT);
        }
        config
    }
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub outfit: GeneratedOutfit,
    pub card: OutfitCard,
}

/// POST /api/v1/recommendations
///
/// Rank outfits from the caller's wardrobe. An empty wardrobe yields an
/// empty list.
pub async fn recommend(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecommendationRequest>,
) -> AppResult<impl IntoResponse> {
    let wardrobe = load_wardrobe(&state, &auth).await?;
    let data = build_recommendations(&wardrobe, &input, chrono::Utc::now().date_naive());

    tracing::info!(
        user_id = %auth.user_id,
        wardrobe_size = wardrobe.len(),
        results = data.len(),
        "Generated recommendations",
    );

    Ok(Json(DataResponse { data }))
}

/// Rank outfits from `wardrobe` and pair each with its card.
fn build_recommendations(
    wardrobe: &[ClothingItem],
    input: &RecommendationRequest,
    today: NaiveDate,
) -> Vec<Recommendation> {
    let ctx = input.context(today);
    generate_outfits(wardrobe, &default_templates(), &ctx, &input.generator_config())
        .into_iter()
        .map(|outfit| Recommendation {
            card: OutfitCard::from_outfit(&outfit),
            outfit,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub items: Vec<ClothingItem>,
    #[serde(default)]
    pub context: ScoringContext,
}

#[derive(Debug, Serialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    pub score: Score,
    pub label: &'static str,
}

/// POST /api/v1/outfits/score
///
/// Score the supplied items without touching storage.
pub async fn score(
    _auth: AuthUser,
    Json(input): Json<ScoreRequest>,
) -> AppResult<impl IntoResponse> {
    let score = score_outfit(&input.items, &input.context)?;

    Ok(Json(DataResponse {
        data: ScoreResult {
            label: match_label(score.total),
            score,
        },
    }))
}

#[cfg(test)]
mod tests {
    use stylisto_core::generator::DEFAULT_MAX_RESULTS;
    use stylisto_core::types::DbId;
    use stylisto_core::wardrobe::Category;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(category: Category, color: &str) -> ClothingItem {
        ClothingItem::new(DbId::new_v4(), format!("{category} {color}"), category, color)
    }

    fn wardrobe() -> Vec<ClothingItem> {
        vec![
            item(Category::Tops, "#FFFFFF").with_tags(["classic"]),
            item(Category::Tops, "#1D4ED8").with_tags(["casual"]),
            item(Category::Bottoms, "#000000").with_tags(["classic"]),
            item(Category::Bottoms, "#1E3A8A").with_tags(["casual"]),
            item(Category::Shoes, "#000000"),
        ]
    }

    #[test]
    fn season_defaults_to_the_current_one() {
        let req = RecommendationRequest::default();
        assert_eq!(req.context(date(2026, 1, 15)).season, Some(Season::Winter));
        assert_eq!(req.context(date(2026, 4, 1)).season, Some(Season::Spring));
        assert_eq!(req.context(date(2026, 7, 4)).season, Some(Season::Summer));
        assert_eq!(req.context(date(2026, 10, 19)).season, Some(Season::Fall));
    }

    #[test]
    fn explicit_season_wins() {
        let req = RecommendationRequest {
            season: Some(Season::Summer),
            ..Default::default()
        };
        assert_eq!(req.context(date(2026, 12, 1)).season, Some(Season::Summer));
    }

    #[test]
    fn max_results_is_clamped() {
        let with = |n| RecommendationRequest {
            max_results: Some(n),
            ..Default::default()
        };
        assert_eq!(with(0).generator_config().max_results, 1);
        assert_eq!(with(7).generator_config().max_results, 7);
        assert_eq!(with(1_000).generator_config().max_results, MAX_RESULTS_LIMIT);
        assert_eq!(
            RecommendationRequest::default().generator_config().max_results,
            DEFAULT_MAX_RESULTS
        );
    }

    #[test]
    fn recommendations_pair_outfits_with_cards() {
        let req = RecommendationRequest {
            max_results: Some(3),
            ..Default::default()
        };
        let recs = build_recommendations(&wardrobe(), &req, date(2026, 10, 19));

        assert!(!recs.is_empty() && recs.len() <= 3);
        for pair in recs.windows(2) {
            assert!(pair[0].outfit.score.total >= pair[1].outfit.score.total);
        }

        let json = serde_json::to_value(&recs[0]).unwrap();
        let outfit = &json["outfit"];
        let card = &json["card"];
        assert!(outfit["items"].as_array().unwrap().len() >= 2);
        assert!(outfit["score"]["total"].is_number());
        assert!(outfit["score"]["breakdown"]["color_harmony"].is_number());
        assert!(outfit["score"]["breakdown"]["weather_suitability"].is_null());
        assert_eq!(
            card["items"].as_array().unwrap().len(),
            outfit["items"].as_array().unwrap().len()
        );
        assert_eq!(card["actions"], serde_json::json!(["save", "refresh", "share"]));
        assert_eq!(
            card["total_percent"].as_u64().unwrap(),
            u64::from(stylisto_core::card::percent(recs[0].outfit.score.total))
        );
    }

    #[test]
    fn empty_wardrobe_yields_no_recommendations() {
        let recs = build_recommendations(&[], &RecommendationRequest::default(), date(2026, 1, 1));
        assert!(recs.is_empty());
    }
}
