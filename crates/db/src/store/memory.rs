//! [`Store`] kept entirely in process memory.
//!
//! Mirrors the Postgres schema's behaviour: per-table id sequences, the same
//! unique constraints (reported by the same constraint names), owner scoping
//! and oldest-first note ordering. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use noteful_core::search::title_matches;
use noteful_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::folder::{CreateFolder, Folder};
use crate::models::note::{Note, NoteFilter, NoteInput, NoteWithTags};
use crate::models::tag::{CreateTag, Tag};
use crate::models::user::{CreateUser, User};
use crate::store::{
    Store, StoreError, StoreResult, UQ_FOLDERS_USER_ID_NAME, UQ_TAGS_USER_ID_NAME,
    UQ_USERS_USERNAME,
};

/// A note row plus its ordered tag links.
#[derive(Debug, Clone)]
struct NoteRow {
    note: Note,
    tag_ids: Vec<DbId>,
}

/// Per-table id counters, like `BIGSERIAL` sequences.
#[derive(Debug, Default)]
struct Sequences {
    users: DbId,
    folders: DbId,
    tags: DbId,
    notes: DbId,
}

fn next(seq: &mut DbId) -> DbId {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    users: Vec<User>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    notes: Vec<NoteRow>,
}

impl Tables {
    fn populate(&self, row: &NoteRow) -> NoteWithTags {
        let tags = row
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.iter().find(|t| t.id == *id).cloned())
            .collect();
        NoteWithTags {
            note: row.note.clone(),
            tags,
        }
    }
}

/// In-memory store. All tables sit behind one async read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation(UQ_USERS_USERNAME.to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: next(&mut tables.seq.users),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            full_name: input.full_name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_folder(&self, user_id: DbId, input: &CreateFolder) -> StoreResult<Folder> {
        let mut tables = self.tables.write().await;
        if tables
            .folders
            .iter()
            .any(|f| f.user_id == user_id && f.name == input.name)
        {
            return Err(StoreError::UniqueViolation(
                UQ_FOLDERS_USER_ID_NAME.to_string(),
            ));
        }
        let now = Utc::now();
        let folder = Folder {
            id: next(&mut tables.seq.folders),
            user_id,
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn list_folders(&self, user_id: DbId) -> StoreResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let mut folders: Vec<Folder> = tables
            .folders
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(folders)
    }

    async fn find_folder(&self, user_id: DbId, folder_id: DbId) -> StoreResult<Option<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .iter()
            .find(|f| f.id == folder_id && f.user_id == user_id)
            .cloned())
    }

    async fn create_tag(&self, user_id: DbId, input: &CreateTag) -> StoreResult<Tag> {
        let mut tables = self.tables.write().await;
        if tables
            .tags
            .iter()
            .any(|t| t.user_id == user_id && t.name == input.name)
        {
            return Err(StoreError::UniqueViolation(UQ_TAGS_USER_ID_NAME.to_string()));
        }
        let now = Utc::now();
        let tag = Tag {
            id: next(&mut tables.seq.tags),
            user_id,
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.tags.push(tag.clone());
        Ok(tag)
    }

    async fn list_tags(&self, user_id: DbId) -> StoreResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .tags
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn count_owned_tags(&self, user_id: DbId, tag_ids: &[DbId]) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .tags
            .iter()
            .filter(|t| t.user_id == user_id && tag_ids.contains(&t.id))
            .count();
        Ok(count as i64)
    }

    async fn list_notes(&self, user_id: DbId, filter: &NoteFilter) -> StoreResult<Vec<NoteWithTags>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<&NoteRow> = tables
            .notes
            .iter()
            .filter(|row| row.note.user_id == user_id)
            .filter(|row| {
                filter
                    .search_term
                    .as_deref()
                    .map_or(true, |term| title_matches(&row.note.title, term))
            })
            .filter(|row| {
                filter
                    .folder_id
                    .map_or(true, |folder_id| row.note.folder_id == Some(folder_id))
            })
            .filter(|row| {
                filter
                    .tag_id
                    .map_or(true, |tag_id| row.tag_ids.contains(&tag_id))
            })
            .collect();
        rows.sort_by(|a, b| {
            a.note
                .created_at
                .cmp(&b.note.created_at)
                .then(a.note.id.cmp(&b.note.id))
        });
        Ok(rows.into_iter().map(|row| tables.populate(row)).collect())
    }

    async fn find_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<Option<NoteWithTags>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .find(|row| row.note.id == note_id && row.note.user_id == user_id)
            .map(|row| tables.populate(row)))
    }

    async fn create_note(&self, user_id: DbId, input: &NoteInput) -> StoreResult<NoteWithTags> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let row = NoteRow {
            note: Note {
                id: next(&mut tables.seq.notes),
                user_id,
                title: input.title.clone(),
                content: input.content.clone(),
                folder_id: input.folder_id,
                created_at: now,
                updated_at: now,
            },
            tag_ids: input.tag_ids.clone(),
        };
        let populated = tables.populate(&row);
        tables.notes.push(row);
        Ok(populated)
    }

    async fn update_note(
        &self,
        user_id: DbId,
        note_id: DbId,
        input: &NoteInput,
    ) -> StoreResult<Option<NoteWithTags>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .notes
            .iter_mut()
            .find(|row| row.note.id == note_id && row.note.user_id == user_id)
        else {
            return Ok(None);
        };

        row.note.title = input.title.clone();
        row.note.content = input.content.clone();
        row.note.folder_id = input.folder_id;
        row.note.updated_at = Utc::now();
        row.tag_ids = input.tag_ids.clone();

        let row = row.clone();
        Ok(Some(tables.populate(&row)))
    }

    async fn delete_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables
            .notes
            .retain(|row| !(row.note.id == note_id && row.note.user_id == user_id));
        Ok(tables.notes.len() < before)
    }
}
