//! Handlers for login and token refresh.

use axum::extract::State;
use axum::Json;
use noteful_core::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::Identity;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::state::AppState;

/// Request body for `POST /login`. Missing, `null` and non-string fields
/// are treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<Value>,
    pub password: Option<Value>,
}

fn credential(field: &Option<Value>) -> &str {
    field.as_ref().and_then(Value::as_str).unwrap_or_default()
}

/// Body returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub auth_token: String,
}

/// POST /api/login
///
/// Exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let identity = state
        .authenticator
        .authenticate(credential(&input.username), credential(&input.password))
        .await?;
    let auth_token = state.authenticator.issue_token(&identity)?;

    tracing::info!(user_id = identity.id, "User logged in");
    Ok(Json(TokenResponse { auth_token }))
}

/// POST /api/refresh
///
/// Issue a fresh token for the holder of a still-valid bearer token. The
/// identity is reloaded so the new token reflects the current user row.
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<TokenResponse>> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;
    let auth_token = state.authenticator.issue_token(&Identity::from(&user))?;

    tracing::debug!(user_id = auth.user_id, "Token refreshed");
    Ok(Json(TokenResponse { auth_token }))
}
