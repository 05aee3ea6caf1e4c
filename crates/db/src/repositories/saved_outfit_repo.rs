//! Repository for `saved_outfits` and the ordered `outfit_items` junction.

use sqlx::PgPool;
use stylisto_core::types::DbId;

use crate::models::saved_outfit::{CreateSavedOutfit, SavedOutfit};

/// Column list for `saved_outfits` queries, aliased as `o`. Item ids are
/// gathered from `outfit_items` in position order.
const COLUMNS: &str = "\
    o.id, o.user_id, o.name, o.occasion, o.source_type, o.is_favorite, \
    o.score::float8 AS score, \
    ARRAY(SELECT oi.item_id FROM outfit_items oi \
          WHERE oi.outfit_id = o.id ORDER BY oi.position) AS item_ids, \
    o.created_at, o.updated_at";

pub struct SavedOutfitRepo;

impl SavedOutfitRepo {
    /// Insert an outfit and its items in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSavedOutfit,
    ) -> Result<SavedOutfit, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (outfit_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO saved_outfits (user_id, name, occasion, source_type, score) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(input.name.trim())
        .bind(input.occasion.as_deref())
        .bind(input.source_type.as_str())
        .bind(input.score)
        .fetch_one(&mut *tx)
        .await?;

        let positions: Vec<i32> = (0..input.item_ids.len() as i32).collect();
        sqlx::query(
            "INSERT INTO outfit_items (outfit_id, item_id, position) \
             SELECT $1, item_id, position \
             FROM UNNEST($2::uuid[], $3::int4[]) AS t(item_id, position)",
        )
        .bind(outfit_id)
        .bind(&input.item_ids)
        .bind(&positions)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM saved_outfits o WHERE o.id = $1");
        let outfit = sqlx::query_as::<_, SavedOutfit>(&query)
            .bind(outfit_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(outfit)
    }

    /// Non-deleted outfits for a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        favorites_only: bool,
    ) -> Result<Vec<SavedOutfit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_outfits o \
             WHERE o.user_id = $1 AND o.is_deleted = false \
               AND ($2 = false OR o.is_favorite = true) \
             ORDER BY o.created_at DESC"
        );
        sqlx::query_as::<_, SavedOutfit>(&query)
            .bind(user_id)
            .bind(favorites_only)
            .fetch_all(pool)
            .await
    }

    /// Find a non-deleted outfit owned by the user.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<SavedOutfit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_outfits o \
             WHERE o.id = $1 AND o.user_id = $2 AND o.is_deleted = false"
        );
        sqlx::query_as::<_, SavedOutfit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the favorite flag. Returns `None` if the outfit does not exist.
    pub async fn set_favorite(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        is_favorite: bool,
    ) -> Result<Option<SavedOutfit>, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE saved_outfits SET is_favorite = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_deleted = false",
        )
        .bind(id)
        .bind(user_id)
        .bind(is_favorite)
        .execute(pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, user_id, id).await
    }

    /// Soft-delete an outfit. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE saved_outfits SET is_deleted = true, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_deleted = false",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
