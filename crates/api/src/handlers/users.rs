//! Handler for registration.

use axum::extract::State;
use noteful_db::models::user::UserResponse;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::json::JsonBody;
use crate::response::{created, Created};
use crate::services::users;
use crate::state::AppState;

/// POST /api/users
///
/// The body is taken as raw JSON so field type errors surface as 422
/// registration errors with a `location`.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Created<UserResponse>> {
    let user = users::register(state.store.as_ref(), &state.authenticator, &body).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(created(format!("/api/users/{}", user.id), user))
}
