//! Handlers for the `/notes` resource.
//!
//! Every handler requires a bearer token and only ever sees the caller's
//! own notes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use noteful_db::models::note::NoteWithTags;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::{created, Created, DataResponse};
use crate::services::notes::{self, NoteQuery, NoteRequest};
use crate::state::AppState;

/// GET /api/notes?searchTerm=&folderId=&tagId=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NoteQuery>,
) -> AppResult<Json<DataResponse<Vec<NoteWithTags>>>> {
    let data = notes::list(state.store.as_ref(), auth.user_id, &query).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/notes/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<NoteWithTags>>> {
    let data = notes::get(state.store.as_ref(), auth.user_id, &id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/notes
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NoteRequest>,
) -> AppResult<Created<NoteWithTags>> {
    let note = notes::create(state.store.as_ref(), auth.user_id, &input).await?;

    tracing::info!(note_id = note.note.id, user_id = auth.user_id, "Note created");
    Ok(created(format!("/api/notes/{}", note.note.id), note))
}

/// PUT /api/notes/{id}
///
/// Replaces the whole note; omitted fields are cleared.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<NoteRequest>,
) -> AppResult<Json<DataResponse<NoteWithTags>>> {
    let note = notes::update(state.store.as_ref(), auth.user_id, &id, &input).await?;

    tracing::info!(note_id = note.note.id, user_id = auth.user_id, "Note updated");
    Ok(Json(DataResponse { data: note }))
}

/// DELETE /api/notes/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    notes::delete(state.store.as_ref(), auth.user_id, &id).await?;

    tracing::info!(note_id = %id, user_id = auth.user_id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
