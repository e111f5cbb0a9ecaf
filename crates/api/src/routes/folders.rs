//! Route definitions for the `/folders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// Routes mounted at `/folders`.
///
/// ```text
/// GET  /  -> list
/// POST /  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(folders::list).post(folders::create))
}
