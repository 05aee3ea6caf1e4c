use axum::routing::post;
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Mounted at `/recommendations`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(recommendations::recommend))
}
