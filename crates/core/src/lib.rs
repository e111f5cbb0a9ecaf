//! Domain types and pure logic shared by the store and the HTTP layer.
//!
//! Nothing in this crate touches the database or the network.

pub mod credentials;
pub mod error;
pub mod ids;
pub mod search;
pub mod types;
