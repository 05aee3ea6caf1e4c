//! Route definitions for the wardrobe, mounted at `/items`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_items
/// POST   /wear      -> record_wear
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/wear", post(items::record_wear))
}
