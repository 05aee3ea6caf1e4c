//! Repository for the `items` table.

use sqlx::PgPool;
use stylisto_core::types::{DbId, Timestamp};

use crate::models::item::ItemRow;

/// Column list for `items` queries. Nullable arrays are coalesced so rows
/// always decode, and `price` is cast from `numeric`.
const COLUMNS: &str = "\
    id, user_id, name, category, subcategory, color, brand, size, \
    COALESCE(season, '{}') AS season, \
    COALESCE(occasion, '{}') AS occasion, \
    image_url, \
    COALESCE(tags, '{}') AS tags, \
    is_favorite, times_worn, last_worn, price::float8 AS price, notes, \
    created_at, updated_at";

/// Read access to a user's wardrobe plus wear tracking.
pub struct ItemRepo;

impl ItemRepo {
    /// All non-deleted items for a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<ItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items \
             WHERE user_id = $1 AND is_deleted = false \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Items owned by the user among `ids`. Missing or foreign ids are
    /// silently absent from the result.
    pub async fn find_by_ids(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<ItemRow>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM items \
             WHERE user_id = $1 AND id = ANY($2) AND is_deleted = false"
        );
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Increment `times_worn` and set `last_worn`. Returns the number of
    /// items updated.
    pub async fn record_wear(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
        worn_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE items \
             SET times_worn = times_worn + 1, last_worn = $3, updated_at = NOW() \
             WHERE user_id = $1 AND id = ANY($2) AND is_deleted = false",
        )
        .bind(user_id)
        .bind(ids)
        .bind(worn_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
