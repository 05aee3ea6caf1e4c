//! Handlers for saved outfits and their favorite flag.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stylisto_core::error::CoreError;
use stylisto_core::types::DbId;
use stylisto_db::models::saved_outfit::{CreateSavedOutfit, SavedOutfitListParams, SetFavorite};
use stylisto_db::repositories::{ItemRepo, SavedOutfitRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/outfits
///
/// List saved outfits, newest first. `?favorites_only=true` narrows to
/// favorites.
pub async fn list_outfits(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SavedOutfitListParams>,
) -> AppResult<impl IntoResponse> {
    let outfits =
        SavedOutfitRepo::list_for_user(&state.pool, auth.user_id, params.favorites_only).await?;
    Ok(Json(DataResponse { data: outfits }))
}

/// POST /api/v1/outfits
///
/// Save an outfit. Every item must belong to the caller.
pub async fn create_outfit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSavedOutfit>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let owned = ItemRepo::find_by_ids(&state.pool, auth.user_id, &input.item_ids).await?;
    if owned.len() != input.item_ids.len() {
        return Err(AppError::Core(CoreError::Validation(
            "Outfit references items that are not in your wardrobe".into(),
        )));
    }

    let outfit = SavedOutfitRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        outfit_id = %outfit.id,
        user_id = %auth.user_id,
        items = outfit.item_ids.len(),
        source = outfit.source().as_str(),
        "Outfit saved",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: outfit })))
}

/// PUT /api/v1/outfits/{id}/favorite
pub async fn set_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(outfit_id): Path<DbId>,
    Json(input): Json<SetFavorite>,
) -> AppResult<impl IntoResponse> {
    let outfit = SavedOutfitRepo::set_favorite(&state.pool, auth.user_id, outfit_id, input.is_favorite)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Outfit",
            id: outfit_id,
        }))?;

    tracing::info!(
        outfit_id = %outfit_id,
        user_id = %auth.user_id,
        is_favorite = input.is_favorite,
        "Outfit favorite updated",
    );

    Ok(Json(DataResponse { data: outfit }))
}

/// DELETE /api/v1/outfits/{id}
///
/// Soft delete; the row stays in storage flagged as deleted.
pub async fn delete_outfit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(outfit_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SavedOutfitRepo::soft_delete(&state.pool, auth.user_id, outfit_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Outfit",
            id: outfit_id,
        }));
    }

    tracing::info!(outfit_id = %outfit_id, user_id = %auth.user_id, "Outfit deleted");

    Ok(StatusCode::NO_CONTENT)
}
