pub mod auth;
pub mod folders;
pub mod notes;
pub mod tags;
pub mod users;
