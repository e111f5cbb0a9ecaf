//! Persistence for users, folders, tags and notes.
//!
//! - [`repositories`] -- zero-sized Postgres repositories taking `&PgPool`.
//! - [`store`] -- the [`Store`] handle the HTTP layer talks to, with a Postgres
//!   implementation ([`PgStore`]) and an in-process one ([`MemoryStore`]).

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::memory::MemoryStore;
pub use store::postgres::PgStore;
pub use store::{Store, StoreError, StoreResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
