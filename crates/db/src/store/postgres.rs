//! [`Store`] backed by PostgreSQL through the repository layer.

use std::collections::HashMap;

use async_trait::async_trait;
use noteful_core::types::DbId;

use crate::models::folder::{CreateFolder, Folder};
use crate::models::note::{Note, NoteFilter, NoteInput, NoteWithTags};
use crate::models::tag::{CreateTag, Tag};
use crate::models::user::{CreateUser, User};
use crate::repositories::{FolderRepo, NoteRepo, TagRepo, UserRepo};
use crate::store::{Store, StoreResult};
use crate::DbPool;

/// Production store. Cheap to clone; the pool is reference counted.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Resolve tag links for `notes` with a single query.
    async fn populate(&self, notes: Vec<Note>) -> StoreResult<Vec<NoteWithTags>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = notes.iter().map(|n| n.id).collect();
        let rows = NoteRepo::tags_for_notes(&self.pool, &ids).await?;

        let mut by_note: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_note.entry(row.note_id).or_default().push(row.tag);
        }

        Ok(notes
            .into_iter()
            .map(|note| {
                let tags = by_note.remove(&note.id).unwrap_or_default();
                NoteWithTags { note, tags }
            })
            .collect())
    }

    async fn populate_one(&self, note: Note) -> StoreResult<NoteWithTags> {
        let mut populated = self.populate(vec![note]).await?;
        Ok(populated.remove(0))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_folder(&self, user_id: DbId, input: &CreateFolder) -> StoreResult<Folder> {
        Ok(FolderRepo::create(&self.pool, user_id, input).await?)
    }

    async fn list_folders(&self, user_id: DbId) -> StoreResult<Vec<Folder>> {
        Ok(FolderRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn find_folder(&self, user_id: DbId, folder_id: DbId) -> StoreResult<Option<Folder>> {
        Ok(FolderRepo::find_owned(&self.pool, user_id, folder_id).await?)
    }

    async fn create_tag(&self, user_id: DbId, input: &CreateTag) -> StoreResult<Tag> {
        Ok(TagRepo::create(&self.pool, user_id, input).await?)
    }

    async fn list_tags(&self, user_id: DbId) -> StoreResult<Vec<Tag>> {
        Ok(TagRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn count_owned_tags(&self, user_id: DbId, tag_ids: &[DbId]) -> StoreResult<i64> {
        Ok(TagRepo::count_owned(&self.pool, user_id, tag_ids).await?)
    }

    async fn list_notes(&self, user_id: DbId, filter: &NoteFilter) -> StoreResult<Vec<NoteWithTags>> {
        let notes = NoteRepo::list(&self.pool, user_id, filter).await?;
        self.populate(notes).await
    }

    async fn find_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<Option<NoteWithTags>> {
        match NoteRepo::find_owned(&self.pool, user_id, note_id).await? {
            Some(note) => self.populate_one(note).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create_note(&self, user_id: DbId, input: &NoteInput) -> StoreResult<NoteWithTags> {
        let note = NoteRepo::create(&self.pool, user_id, input).await?;
        self.populate_one(note).await
    }

    async fn update_note(
        &self,
        user_id: DbId,
        note_id: DbId,
        input: &NoteInput,
    ) -> StoreResult<Option<NoteWithTags>> {
        match NoteRepo::update_owned(&self.pool, user_id, note_id, input).await? {
            Some(note) => self.populate_one(note).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::delete_owned(&self.pool, user_id, note_id).await?)
    }
}
