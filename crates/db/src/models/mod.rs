//! Row models and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` view for API responses where the row must not leak
//! - A create DTO for inserts

pub mod folder;
pub mod note;
pub mod tag;
pub mod user;
