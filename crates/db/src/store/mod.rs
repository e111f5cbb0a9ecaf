//! The store handle.
//!
//! [`Store`] is the single persistence seam used by the HTTP layer. It is
//! created once at startup, shared as `Arc<dyn Store>`, and every folder, tag
//! and note method is scoped by the owning user's id.
//!
//! - [`postgres::PgStore`] -- production implementation over the repositories.
//! - [`memory::MemoryStore`] -- in-process tables, used by tests.

use async_trait::async_trait;
use noteful_core::types::DbId;

use crate::models::folder::{CreateFolder, Folder};
use crate::models::note::{NoteFilter, NoteInput, NoteWithTags};
use crate::models::tag::{CreateTag, Tag};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

/// Unique constraint on `users.username`.
pub const UQ_USERS_USERNAME: &str = "uq_users_username";
/// Unique constraint on `(folders.user_id, folders.name)`.
pub const UQ_FOLDERS_USER_ID_NAME: &str = "uq_folders_user_id_name";
/// Unique constraint on `(tags.user_id, tags.name)`.
pub const UQ_TAGS_USER_ID_NAME: &str = "uq_tags_user_id_name";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write collided with a unique constraint; carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations needed by the API.
#[async_trait]
pub trait Store: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // --- users ---

    /// Insert a user. A taken username yields
    /// `UniqueViolation(UQ_USERS_USERNAME)`.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    // --- folders ---

    async fn create_folder(&self, user_id: DbId, input: &CreateFolder) -> StoreResult<Folder>;

    async fn list_folders(&self, user_id: DbId) -> StoreResult<Vec<Folder>>;

    /// The folder with `folder_id`, only if `user_id` owns it.
    async fn find_folder(&self, user_id: DbId, folder_id: DbId) -> StoreResult<Option<Folder>>;

    // --- tags ---

    async fn create_tag(&self, user_id: DbId, input: &CreateTag) -> StoreResult<Tag>;

    async fn list_tags(&self, user_id: DbId) -> StoreResult<Vec<Tag>>;

    /// Number of distinct tags among `tag_ids` that `user_id` owns.
    async fn count_owned_tags(&self, user_id: DbId, tag_ids: &[DbId]) -> StoreResult<i64>;

    // --- notes ---

    /// A user's notes matching `filter`, oldest first, tags populated.
    async fn list_notes(&self, user_id: DbId, filter: &NoteFilter) -> StoreResult<Vec<NoteWithTags>>;

    async fn find_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<Option<NoteWithTags>>;

    async fn create_note(&self, user_id: DbId, input: &NoteInput) -> StoreResult<NoteWithTags>;

    /// Replace the note matching `{note_id, user_id}`; `None` if there is none.
    async fn update_note(
        &self,
        user_id: DbId,
        note_id: DbId,
        input: &NoteInput,
    ) -> StoreResult<Option<NoteWithTags>>;

    /// Delete the note matching `{note_id, user_id}`. Returns true if deleted.
    async fn delete_note(&self, user_id: DbId, note_id: DbId) -> StoreResult<bool>;
}
