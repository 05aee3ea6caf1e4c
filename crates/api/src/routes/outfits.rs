//! Route definitions for saved outfits, mounted at `/outfits`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{outfits, recommendations};
use crate::state::AppState;

/// ```text
/// GET    /                -> list_outfits
/// POST   /                -> create_outfit
/// POST   /score           -> recommendations::score
/// DELETE /{id}            -> delete_outfit
/// PUT    /{id}/favorite   -> set_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(outfits::list_outfits).post(outfits::create_outfit))
        .route("/score", post(recommendations::score))
        .route("/{id}", delete(outfits::delete_outfit))
        .route("/{id}/favorite", put(outfits::set_favorite))
}
