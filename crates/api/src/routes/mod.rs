pub mod health;
pub mod items;
pub mod outfits;
pub mod recommendations;
pub mod try_on;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a bearer token.
///
/// ```text
/// /items                          list wardrobe (GET)
/// /items/wear                     record wear (POST)
///
/// /recommendations                ranked outfits (POST)
///
/// /outfits                        list, save (GET, POST)
/// /outfits/score                  stateless scoring (POST)
/// /outfits/{id}                   soft delete (DELETE)
/// /outfits/{id}/favorite          set favorite (PUT)
///
/// /try-on                         generate (POST)
/// /try-on/results                 list (GET)
/// /try-on/results/{id}            delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        .nest("/recommendations", recommendations::router())
        .nest("/outfits", outfits::router())
        .nest("/try-on", try_on::router())
}
