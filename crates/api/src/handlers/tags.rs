//! Handlers for the `/tags` resource.

use axum::extract::State;
use axum::Json;
use noteful_db::models::tag::Tag;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::{created, Created, DataResponse};
use crate::services::labels::{self, LabelRequest};
use crate::state::AppState;

/// GET /api/tags
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let data = state.store.list_tags(auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/tags
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LabelRequest>,
) -> AppResult<Created<Tag>> {
    let tag = labels::create_tag(state.store.as_ref(), auth.user_id, &input).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");
    Ok(created(format!("/api/tags/{}", tag.id), tag))
}
