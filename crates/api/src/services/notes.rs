//! Owner-scoped note operations.
//!
//! Raw path ids and request bodies come in; typed store calls go out. Checks
//! run in a fixed order: note id, title, folder id syntax, tag id syntax, then
//! reference ownership. Nothing is written unless every check passes.

use noteful_core::error::CoreError;
use noteful_core::ids::{parse_id, parse_id_list, parse_optional_id, parse_optional_id_value};
use noteful_core::search::normalize_search_term;
use noteful_core::types::DbId;
use noteful_db::models::note::{NoteFilter, NoteInput, NoteWithTags};
use noteful_db::Store;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::services::references::validate_references;

/// Query parameters for `GET /notes`. Empty values do not filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteQuery {
    pub search_term: Option<String>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

/// Body for `POST /notes` and `PUT /notes/{id}`.
///
/// Reference fields stay untyped until parsed so that `""`, `0`, `false` and
/// numeric or string ids are all accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<Value>,
    pub tags: Option<Vec<Value>>,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Note", id }
}

/// Turn a request body into store input. Absent fields become empty, so an
/// update replaces the whole note.
fn parse_request(request: &NoteRequest) -> Result<NoteInput, CoreError> {
    let title = request
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .ok_or(CoreError::MissingTitle)?;

    let folder_id = parse_optional_id_value(request.folder_id.as_ref())?;

    let tag_ids = match &request.tags {
        Some(tags) => parse_id_list(tags)?,
        None => Vec::new(),
    };

    Ok(NoteInput {
        title: title.to_string(),
        content: request.content.clone(),
        folder_id,
        tag_ids,
    })
}

/// List the user's notes matching `query`, oldest first.
pub async fn list(store: &dyn Store, user_id: DbId, query: &NoteQuery) -> AppResult<Vec<NoteWithTags>> {
    let filter = NoteFilter {
        search_term: normalize_search_term(query.search_term.as_deref()).map(str::to_owned),
        folder_id: parse_optional_id(query.folder_id.as_deref())?,
        tag_id: parse_optional_id(query.tag_id.as_deref())?,
    };
    Ok(store.list_notes(user_id, &filter).await?)
}

/// Fetch one note. Foreign and nonexistent ids are both `NotFound`.
pub async fn get(store: &dyn Store, user_id: DbId, raw_id: &str) -> AppResult<NoteWithTags> {
    let note_id = parse_id(raw_id)?;
    store
        .find_note(user_id, note_id)
        .await?
        .ok_or_else(|| not_found(note_id).into())
}

pub async fn create(store: &dyn Store, user_id: DbId, request: &NoteRequest) -> AppResult<NoteWithTags> {
    let input = parse_request(request)?;
    validate_references(store, user_id, input.folder_id, &input.tag_ids).await?;
    Ok(store.create_note(user_id, &input).await?)
}

/// Replace a note's title, content, folder and tags.
pub async fn update(
    store: &dyn Store,
    user_id: DbId,
    raw_id: &str,
    request: &NoteRequest,
) -> AppResult<NoteWithTags> {
    let note_id = parse_id(raw_id)?;
    let input = parse_request(request)?;
    validate_references(store, user_id, input.folder_id, &input.tag_ids).await?;
    store
        .update_note(user_id, note_id, &input)
        .await?
        .ok_or_else(|| not_found(note_id).into())
}

pub async fn delete(store: &dyn Store, user_id: DbId, raw_id: &str) -> AppResult<()> {
    let note_id = parse_id(raw_id)?;
    if !store.delete_note(user_id, note_id).await? {
        return Err(not_found(note_id).into());
    }
    Ok(())
}
