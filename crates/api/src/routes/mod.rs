pub mod auth;
pub mod folders;
pub mod health;
pub mod notes;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                 register (public)
/// /login                 login (public)
/// /refresh               refresh (requires auth)
///
/// /notes                 list, create
/// /notes/{id}            get, update, delete
///
/// /folders               list, create
/// /tags                  list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration.
        .nest("/users", users::router())
        // Authentication routes (login, refresh).
        .merge(auth::router())
        // Owner-scoped resources.
        .nest("/notes", notes::router())
        .nest("/folders", folders::router())
        .nest("/tags", tags::router())
}
