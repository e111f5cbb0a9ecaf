//! Repository for the `notes` and `note_tags` tables.

use noteful_core::search::like_pattern;
use noteful_core::types::DbId;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::models::note::{Note, NoteFilter, NoteInput};
use crate::models::tag::Tag;

const COLUMNS: &str = "id, user_id, title, content, folder_id, created_at, updated_at";

/// A tag joined to the note that links it.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTagRow {
    pub note_id: DbId,
    #[sqlx(flatten)]
    pub tag: Tag,
}

/// Owner-scoped operations on notes. Every query carries `user_id`.
pub struct NoteRepo;

impl NoteRepo {
    /// List a user's notes matching every set filter, oldest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &NoteFilter,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let mut conditions = vec!["user_id = $1".to_string()];
        let mut bind_idx = 2u32;

        if filter.search_term.is_some() {
            conditions.push(format!("title ILIKE ${bind_idx} ESCAPE '\\'"));
            bind_idx += 1;
        }
        if filter.folder_id.is_some() {
            conditions.push(format!("folder_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.tag_id.is_some() {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM note_tags nt \
                 WHERE nt.note_id = notes.id AND nt.tag_id = ${bind_idx})"
            ));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE {} ORDER BY created_at, id",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Note>(&query).bind(user_id);
        if let Some(ref term) = filter.search_term {
            q = q.bind(like_pattern(term));
        }
        if let Some(folder_id) = filter.folder_id {
            q = q.bind(folder_id);
        }
        if let Some(tag_id) = filter.tag_id {
            q = q.bind(tag_id);
        }
        q.fetch_all(pool).await
    }

    /// Find a note by id, only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a note and its tag links in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NoteInput,
    ) -> Result<Note, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO notes (user_id, title, content, folder_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.folder_id)
            .fetch_one(&mut *tx)
            .await?;

        Self::link_tags(&mut tx, note.id, &input.tag_ids).await?;

        tx.commit().await?;
        Ok(note)
    }

    /// Replace a note's fields and tag links.
    ///
    /// Returns `None` (and writes nothing) if no note matches both `id` and
    /// `user_id`.
    pub async fn update_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &NoteInput,
    ) -> Result<Option<Note>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE notes SET title = $3, content = $4, folder_id = $5
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(note) = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.folder_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
            .bind(note.id)
            .execute(&mut *tx)
            .await?;
        Self::link_tags(&mut tx, note.id, &input.tag_ids).await?;

        tx.commit().await?;
        Ok(Some(note))
    }

    /// Delete a note only if `user_id` owns it. Returns true if deleted.
    pub async fn delete_owned(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the tags linked to each of `note_ids`, in link order.
    pub async fn tags_for_notes(
        pool: &PgPool,
        note_ids: &[DbId],
    ) -> Result<Vec<NoteTagRow>, sqlx::Error> {
        sqlx::query_as::<_, NoteTagRow>(
            "SELECT nt.note_id, t.id, t.user_id, t.name, t.created_at, t.updated_at
             FROM note_tags nt
             JOIN tags t ON t.id = nt.tag_id
             WHERE nt.note_id = ANY($1)
             ORDER BY nt.note_id, nt.position",
        )
        .bind(note_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert `note_tags` rows keeping the submitted order in `position`.
    async fn link_tags(
        tx: &mut Transaction<'_, Postgres>,
        note_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id, position)
             SELECT $1, t.tag_id, t.ord::INTEGER
             FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(tag_id, ord)",
        )
        .bind(note_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
