use std::time::Duration;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Upper bound on the try-on health check so a hung server cannot stall `/health`.
const TRYON_HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database is reachable, otherwise `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the try-on server reports itself healthy. Informational only;
    /// the API stays usable without it.
    pub tryon_healthy: bool,
}

/// GET /health -- returns service, database and try-on server health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, tryon) = tokio::join!(
        stylisto_db::health_check(&state.pool),
        tokio::time::timeout(TRYON_HEALTH_TIMEOUT, state.tryon.health_check()),
    );
    let db_healthy = db.is_ok();
    let tryon_healthy = matches!(tryon, Ok(Ok(true)));

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        tryon_healthy,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
