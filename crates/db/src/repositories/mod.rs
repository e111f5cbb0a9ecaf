//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Folder, tag and note methods take the
//! owning user id and never touch another user's rows.

pub mod folder_repo;
pub mod note_repo;
pub mod tag_repo;
pub mod user_repo;

pub use folder_repo::FolderRepo;
pub use note_repo::NoteRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
