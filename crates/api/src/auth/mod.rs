//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 token generation and validation.
//! - [`authenticator`] -- the [`Authenticator`] capability handlers use to
//!   check passwords and issue or verify tokens.

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::{Authenticator, Identity};
