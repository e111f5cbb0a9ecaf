//! Shared response envelope types for API handlers.
//!
//! Entity responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: notes }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A `201 Created` response with a `Location` header and a [`DataResponse`] body.
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<DataResponse<T>>);

/// Build a [`Created`] response for the entity at `location`.
pub fn created<T: Serialize>(location: String, data: T) -> Created<T> {
    (
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(DataResponse { data }),
    )
}
