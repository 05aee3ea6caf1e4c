use std::sync::Arc;

use stylisto_tryon::TryOnClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stylisto_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Client for the external try-on inference server.
    pub tryon: Arc<TryOnClient>,
}
