//! Repository for the `tags` table.

use noteful_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{CreateTag, Tag};

const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Owner-scoped operations on tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a tag owned by `user_id`.
    ///
    /// Fails with a unique violation on `uq_tags_user_id_name` if the user
    /// already has a tag with that name.
    pub async fn create(pool: &PgPool, user_id: DbId, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (user_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List a user's tags ordered by name.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE user_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count the distinct tags among `ids` that `user_id` owns.
    ///
    /// Duplicate ids in `ids` are counted once.
    pub async fn count_owned(pool: &PgPool, user_id: DbId, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tags WHERE id = ANY($1) AND user_id = $2")
                .bind(ids)
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
