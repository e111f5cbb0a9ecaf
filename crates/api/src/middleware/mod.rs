//! Request extractors that run before handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token.
//! - [`json::JsonBody`] -- Deserializes a JSON body, rejecting with [`AppError`](crate::error::AppError).

pub mod auth;
pub mod json;
