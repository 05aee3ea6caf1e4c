//! Virtual try-on handlers.
//!
//! Generation failures from the inference server are reported in the body
//! as `{ success: false, error }` rather than as an HTTP error, matching the
//! client contract.
//!
//! The user photo must arrive inline as a `data:` URL; the server only
//! downloads garment images, and only from the configured storage hosts.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use stylisto_core::error::CoreError;
use stylisto_core::outfit::validate_outfit_items;
use stylisto_core::types::DbId;
use stylisto_db::models::try_on_result::{CreateTryOnResult, TryOnResult};
use stylisto_db::repositories::{ItemRepo, TryOnResultRepo};
use stylisto_tryon::images::{classify, data_url_payload, to_data_url, ImageSource};
use stylisto_tryon::{TryOnRequest, TryOnResponse};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// MIME type assumed for raw base64 results from the inference server.
const RESULT_MIME: &str = "image/jpeg";

#[derive(Debug, Deserialize)]
pub struct TryOnApiRequest {
    /// Photo of the user as a `data:<mime>;base64,<payload>` URL.
    pub user_image: String,
    /// Wardrobe items to dress the user in, in layering order.
    pub item_ids: Vec<DbId>,
    #[serde(default)]
    pub outfit_id: Option<DbId>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Persist a successful result (default `true`).
    #[serde(default = "default_save")]
    pub save: bool,
}

fn default_save() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct TryOnOutcome {
    pub result: TryOnResponse,
    pub saved: Option<TryOnResult>,
}

/// POST /api/v1/try-on
pub async fn create_try_on(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TryOnApiRequest>,
) -> AppResult<impl IntoResponse> {
    validate_outfit_items(&input.item_ids)?;
    let user_image = inline_user_image(&input.user_image)?;

    let rows = ItemRepo::find_by_ids(&state.pool, auth.user_id, &input.item_ids).await?;
    let mut image_by_id: HashMap<DbId, Option<String>> =
        rows.into_iter().map(|r| (r.id, r.image_url)).collect();

    let mut garment_urls = Vec::with_capacity(input.item_ids.len());
    for id in &input.item_ids {
        match image_by_id.remove(id) {
            Some(Some(url)) => garment_urls.push(url),
            Some(None) => tracing::warn!(item_id = %id, "Item has no image, skipping"),
            None => {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Item",
                    id: *id,
                }))
            }
        }
    }

    let clothing_images = state.tryon.prepare_images(&garment_urls).await;
    if clothing_images.is_empty() {
        return Err(AppError::BadRequest(
            "None of the selected items has a usable image".into(),
        ));
    }

    let request = TryOnRequest::new(user_image, clothing_images, input.prompt.clone());
    let result = state.tryon.generate(&request).await;

    let saved = match (&result.result_image, result.success && input.save) {
        (Some(image), true) => {
            let record = CreateTryOnResult {
                outfit_id: input.outfit_id,
                generated_image_url: result_image_url(image),
                confidence_score: None,
                processing_time_ms: result.processing_time.map(|s| (s * 1000.0).round() as i32),
                prompt_used: request.prompt.clone(),
                items_used: input.item_ids.clone(),
            };
            Some(TryOnResultRepo::create(&state.pool, auth.user_id, &record).await?)
        }
        _ => None,
    };

    tracing::info!(
        user_id = %auth.user_id,
        success = result.success,
        garments = request.clothing_images.len(),
        saved = saved.is_some(),
        "Virtual try-on finished",
    );

    Ok(Json(DataResponse {
        data: TryOnOutcome { result, saved },
    }))
}

/// GET /api/v1/try-on/results
pub async fn list_results(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let results = TryOnResultRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: results }))
}

/// DELETE /api/v1/try-on/results/{id}
pub async fn delete_result(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(result_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TryOnResultRepo::delete(&state.pool, auth.user_id, result_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TryOnResult",
            id: result_id,
        }));
    }

    tracing::info!(result_id = %result_id, user_id = %auth.user_id, "Try-on result deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Base64 payload of the user photo, which must be an inline `data:` URL.
fn inline_user_image(url: &str) -> Result<String, CoreError> {
    match data_url_payload(url.trim()) {
        Some(payload) if !payload.trim().is_empty() => Ok(payload.trim().to_string()),
        _ => Err(CoreError::Validation(
            "user_image must be a base64 data: URL".into(),
        )),
    }
}

/// Storable URL for a result image: URLs pass through, raw base64 is
/// wrapped as a `data:` URL.
fn result_image_url(image: &str) -> String {
    match classify(image) {
        ImageSource::DataUrl(_) | ImageSource::Remote(_) => image.trim().to_string(),
        ImageSource::Unsupported => to_data_url(RESULT_MIME, image.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_image_must_be_inline() {
        assert_eq!(
            inline_user_image("data:image/jpeg;base64,dXNlcg==").unwrap(),
            "dXNlcg=="
        );
        assert!(inline_user_image("http://169.254.169.254/latest/meta-data").is_err());
        assert!(inline_user_image("https://cdn.example/me.jpg").is_err());
        assert!(inline_user_image("data:image/jpeg;base64,").is_err());
        assert!(inline_user_image("dXNlcg==").is_err());
    }

    #[test]
    fn raw_base64_is_wrapped() {
        assert_eq!(result_image_url("QUJD"), "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            result_image_url("https://cdn.example/r.png"),
            "https://cdn.example/r.png"
        );
        assert_eq!(
            result_image_url("data:image/png;base64,QUJD"),
            "data:image/png;base64,QUJD"
        );
    }
}
