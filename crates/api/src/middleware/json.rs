//! JSON body extractor that reports failures through [`AppError`].
//!
//! Axum's own `Json<T>` rejects unparseable or wrong-typed bodies with a
//! plain-text response. [`JsonBody`] turns every such rejection into
//! [`CoreError::Validation`] so clients always get the `{ error, code }` shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use noteful_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A request body deserialized as `T`.
///
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<NoteRequest>) -> AppResult<..> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection).into()),
        }
    }
}

fn reject(rejection: JsonRejection) -> CoreError {
    tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
    CoreError::Validation(rejection.body_text())
}
