//! Handlers for the user's wardrobe.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use stylisto_core::wardrobe::ClothingItem;
use stylisto_db::models::item::RecordWear;
use stylisto_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WearRecorded {
    pub updated: u64,
}

/// Load the caller's wardrobe as scorer-ready items.
pub(crate) async fn load_wardrobe(state: &AppState, auth: &AuthUser) -> AppResult<Vec<ClothingItem>> {
    let rows = ItemRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(rows.into_iter().map(|r| r.into_clothing_item()).collect())
}

/// GET /api/v1/items
pub async fn list_items(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = load_wardrobe(&state, &auth).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/items/wear
///
/// Mark items as worn, incrementing their wear counters.
pub async fn record_wear(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecordWear>,
) -> AppResult<impl IntoResponse> {
    if input.item_ids.is_empty() {
        return Err(AppError::BadRequest("item_ids must not be empty".into()));
    }

    let worn_at = input.worn_at.unwrap_or_else(chrono::Utc::now);
    let updated = ItemRepo::record_wear(&state.pool, auth.user_id, &input.item_ids, worn_at).await?;

    tracing::info!(user_id = %auth.user_id, updated, "Recorded wear");

    Ok(Json(DataResponse {
        data: WearRecorded { updated },
    }))
}
