//! Repository for the `virtual_try_on_results` table.

use sqlx::PgPool;
use stylisto_core::types::DbId;

use crate::models::try_on_result::{CreateTryOnResult, TryOnResult};

const COLUMNS: &str = "\
    id, outfit_id, user_id, generated_image_url, \
    confidence_score::float8 AS confidence_score, processing_time_ms, \
    prompt_used, COALESCE(items_used, '{}') AS items_used, created_at";

pub struct TryOnResultRepo;

impl TryOnResultRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTryOnResult,
    ) -> Result<TryOnResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO virtual_try_on_results \
                 (outfit_id, user_id, generated_image_url, confidence_score, \
                  processing_time_ms, prompt_used, items_used) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TryOnResult>(&query)
            .bind(input.outfit_id)
            .bind(user_id)
            .bind(&input.generated_image_url)
            .bind(input.confidence_score)
            .bind(input.processing_time_ms)
            .bind(input.prompt_used.as_deref())
            .bind(&input.items_used)
            .fetch_one(pool)
            .await
    }

    /// Results for a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<TryOnResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM virtual_try_on_results \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TryOnResult>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Permanently delete a result. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM virtual_try_on_results WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
