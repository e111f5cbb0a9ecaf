//! User registration.

use noteful_core::credentials::validate_registration;
use noteful_core::error::CoreError;
use noteful_db::models::user::{CreateUser, UserResponse};
use noteful_db::store::UQ_USERS_USERNAME;
use noteful_db::{Store, StoreError};
use serde_json::Value;

use crate::auth::Authenticator;
use crate::error::{AppError, AppResult};

/// Validate a registration body, hash the password and create the user.
///
/// The body stays untyped so the credential validator can report wrong field
/// types itself. A taken username is [`CoreError::DuplicateUsername`].
pub async fn register(
    store: &dyn Store,
    authenticator: &Authenticator,
    body: &Value,
) -> AppResult<UserResponse> {
    let credentials = validate_registration(body).map_err(CoreError::from)?;
    let password_hash = authenticator.hash_password(&credentials.password).await?;

    let input = CreateUser {
        username: credentials.username,
        password_hash,
        full_name: credentials.full_name,
    };
    let user = store.create_user(&input).await.map_err(|err| match err {
        StoreError::UniqueViolation(constraint) if constraint == UQ_USERS_USERNAME => {
            AppError::from(CoreError::DuplicateUsername)
        }
        other => other.into(),
    })?;

    Ok(UserResponse::from(&user))
}
