//! Rows from the `virtual_try_on_results` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stylisto_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TryOnResult {
    pub id: DbId,
    pub outfit_id: Option<DbId>,
    pub user_id: DbId,
    pub generated_image_url: String,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
    pub prompt_used: Option<String>,
    pub items_used: Vec<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTryOnResult {
    pub outfit_id: Option<DbId>,
    pub generated_image_url: String,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
    pub prompt_used: Option<String>,
    pub items_used: Vec<DbId>,
}
