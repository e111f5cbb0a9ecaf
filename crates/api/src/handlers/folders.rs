//! Handlers for the `/folders` resource.

use axum::extract::State;
use axum::Json;
use noteful_db::models::folder::Folder;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::{created, Created, DataResponse};
use crate::services::labels::{self, LabelRequest};
use crate::state::AppState;

/// GET /api/folders
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Folder>>>> {
    let data = state.store.list_folders(auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/folders
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LabelRequest>,
) -> AppResult<Created<Folder>> {
    let folder = labels::create_folder(state.store.as_ref(), auth.user_id, &input).await?;

    tracing::info!(folder_id = folder.id, user_id = auth.user_id, "Folder created");
    Ok(created(format!("/api/folders/{}", folder.id), folder))
}
