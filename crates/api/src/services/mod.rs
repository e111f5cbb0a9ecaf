//! Request-independent business logic between handlers and the store.
//!
//! - [`notes`] -- owner-scoped note listing, lookup, create, replace, delete.
//! - [`references`] -- folder and tag ownership checks run before note writes.
//! - [`labels`] -- folder and tag creation.
//! - [`users`] -- registration.
//!
//! Services take `&dyn Store` and return [`AppResult`](crate::error::AppResult)
//! so they can be exercised without an HTTP stack.

pub mod labels;
pub mod notes;
pub mod references;
pub mod users;
