//! Note entity model, populated view, and write/filter DTOs.

use noteful_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::Tag;

/// A row from the `notes` table. Tag links live in `note_tags`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A note with its tag ids resolved to full tag rows, in link order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteWithTags {
    #[serde(flatten)]
    pub note: Note,
    pub tags: Vec<Tag>,
}

/// Validated write input shared by create and update.
///
/// Ownership of `folder_id` and `tag_ids` has already been checked by the
/// caller; the store writes them as given.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
}

/// Filters for listing a user's notes. `None` fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive literal substring of the title.
    pub search_term: Option<String>,
    pub folder_id: Option<DbId>,
    /// Notes linked to this tag.
    pub tag_id: Option<DbId>,
}
