//! Route definitions for virtual try-on, mounted at `/try-on`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::try_on;
use crate::state::AppState;

/// ```text
/// POST   /                -> create_try_on
/// GET    /results         -> list_results
/// DELETE /results/{id}    -> delete_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(try_on::create_try_on))
        .route("/results", get(try_on::list_results))
        .route("/results/{id}", delete(try_on::delete_result))
}
