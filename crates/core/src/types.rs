//! Primitive aliases shared by every crate in the workspace.

/// Primary keys of users, folders, tags and notes (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
