use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use noteful_core::error::CoreError;
use noteful_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures that were not translated by a service. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `noteful_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Registration(err) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    err.to_string(),
                ),
                CoreError::InvalidId => (StatusCode::BAD_REQUEST, "INVALID_ID", core.to_string()),
                CoreError::MissingTitle => {
                    (StatusCode::BAD_REQUEST, "MISSING_TITLE", core.to_string())
                }
                CoreError::InvalidFolder => {
                    (StatusCode::BAD_REQUEST, "INVALID_FOLDER", core.to_string())
                }
                CoreError::InvalidTag => (StatusCode::BAD_REQUEST, "INVALID_TAG", core.to_string()),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::MissingCredentials => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
                CoreError::DuplicateUsername => (
                    StatusCode::BAD_REQUEST,
                    "DUPLICATE_USERNAME",
                    core.to_string(),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::AuthenticationDenied => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", core.to_string())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });

        // Registration failures also name the offending body field.
        if let AppError::Core(CoreError::Registration(err)) = &self {
            body["reason"] = json!("ValidationError");
            body["location"] = json!(err.field());
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::UniqueViolation(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
