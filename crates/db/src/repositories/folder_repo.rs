//! Repository for the `folders` table.

use noteful_core::types::DbId;
use sqlx::PgPool;

use crate::models::folder::{CreateFolder, Folder};

const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

/// Owner-scoped operations on folders.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a folder owned by `user_id`.
    ///
    /// Fails with a unique violation on `uq_folders_user_id_name` if the user
    /// already has a folder with that name.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFolder,
    ) -> Result<Folder, sqlx::Error> {
        let query = format!(
            "INSERT INTO folders (user_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(user_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List a user's folders ordered by name.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE user_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Folder>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a folder by id, only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
