//! The authentication capability shared by login, registration and the
//! bearer-token extractor.
//!
//! One [`Authenticator`] is built at startup from the store handle and the JWT
//! configuration and lives in [`AppState`](crate::state::AppState). Argon2 work
//! runs on the blocking thread pool so it never stalls the async workers.

use std::sync::{Arc, OnceLock};

use noteful_core::error::CoreError;
use noteful_core::types::DbId;
use noteful_db::models::user::User;
use noteful_db::Store;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_token, validate_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};

/// Public identity of an authenticated user. Carried inside tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Why a login was refused. Only ever logged; callers see one error.
#[derive(Debug, Clone, Copy)]
enum DenialReason {
    UnknownUser,
    WrongPassword,
}

/// Checks passwords and issues and verifies bearer tokens.
pub struct Authenticator {
    store: Arc<dyn Store>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(store: Arc<dyn Store>, jwt: JwtConfig) -> Self {
        Self { store, jwt }
    }

    /// Check a username/password pair.
    ///
    /// Empty or missing credentials fail with
    /// [`CoreError::MissingCredentials`]. An unknown username and a wrong
    /// password both fail with [`CoreError::AuthenticationDenied`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, CoreError> {
        if username.is_empty() || password.is_empty() {
            return Err(CoreError::MissingCredentials);
        }

        let user = self
            .store
            .find_user_by_username(username)
            .await
            .map_err(|e| CoreError::Internal(format!("User lookup failed: {e}")))?;

        let password = password.to_owned();
        let digest = user.as_ref().map(|user| user.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || check_password(&password, digest.as_deref()))
            .await
            .map_err(|e| CoreError::Internal(format!("Password task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;

        let Some(user) = user else {
            return Err(deny(username, DenialReason::UnknownUser));
        };
        if !matches {
            return Err(deny(username, DenialReason::WrongPassword));
        }

        Ok(Identity::from(&user))
    }

    /// Hash a password for storage.
    pub async fn hash_password(&self, password: &str) -> Result<String, CoreError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Password task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
    }

    /// Sign a token for `identity`.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, CoreError> {
        generate_token(identity, &self.jwt)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))
    }

    /// Verify a token and return the identity it was issued to.
    pub fn verify_token(&self, token: &str) -> Result<Identity, CoreError> {
        validate_token(token, &self.jwt)
            .map(|claims| claims.user)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))
    }
}

/// Verify `password` against `digest`. Without a digest the password is
/// checked against [`dummy_digest`] and rejected, so an unknown username
/// costs the same Argon2 work as a wrong password.
fn check_password(password: &str, digest: Option<&str>) -> Result<bool, argon2::password_hash::Error> {
    match digest {
        Some(digest) => verify_password(password, digest),
        None => {
            let _ = verify_password(password, dummy_digest());
            Ok(false)
        }
    }
}

/// A valid Argon2id digest of a throwaway password, computed once.
fn dummy_digest() -> &'static str {
    static DIGEST: OnceLock<String> = OnceLock::new();
    DIGEST.get_or_init(|| hash_password("noteful-unknown-user").unwrap_or_default())
}

fn deny(username: &str, reason: DenialReason) -> CoreError {
    tracing::debug!(username, ?reason, "Login refused");
    CoreError::AuthenticationDenied
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use noteful_db::models::user::CreateUser;
    use noteful_db::MemoryStore;

    use super::*;

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "authenticator-test-secret".to_string(),
            expiry_mins: 15,
        }
    }

    async fn authenticator_with_user(username: &str, password: &str) -> Authenticator {
        let store = Arc::new(MemoryStore::new());
        let auth = Authenticator::new(store.clone(), test_jwt());
        let digest = auth.hash_password(password).await.unwrap();
        store
            .create_user(&CreateUser {
                username: username.to_string(),
                password_hash: digest,
                full_name: "Bobby Tables".to_string(),
            })
            .await
            .unwrap();
        auth
    }

    #[tokio::test]
    async fn correct_password_yields_identity() {
        let auth = authenticator_with_user("bobby", "password123").await;

        let identity = auth.authenticate("bobby", "password123").await.unwrap();
        assert_eq!(identity.username, "bobby");
        assert_eq!(identity.full_name, "Bobby Tables");
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let auth = authenticator_with_user("bobby", "password123").await;

        let unknown = auth.authenticate("nobody", "password123").await.unwrap_err();
        let wrong = auth.authenticate("bobby", "password124").await.unwrap_err();

        assert_matches!(unknown, CoreError::AuthenticationDenied);
        assert_matches!(wrong, CoreError::AuthenticationDenied);
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn empty_credentials_are_a_bad_request() {
        let auth = authenticator_with_user("bobby", "password123").await;

        assert_matches!(
            auth.authenticate("", "password123").await,
            Err(CoreError::MissingCredentials)
        );
        assert_matches!(
            auth.authenticate("bobby", "").await,
            Err(CoreError::MissingCredentials)
        );
    }

    #[test]
    fn unknown_user_check_runs_a_real_verification() {
        // A parseable digest means verify_password does full Argon2 work.
        assert!(dummy_digest().starts_with("$argon2id$"));
        assert_matches!(verify_password("password123", dummy_digest()), Ok(false));
        assert_matches!(check_password("password123", None), Ok(false));
    }

    #[tokio::test]
    async fn issued_token_verifies_to_same_identity() {
        let auth = authenticator_with_user("bobby", "password123").await;
        let identity = auth.authenticate("bobby", "password123").await.unwrap();

        let token = auth.issue_token(&identity).unwrap();
        assert_eq!(auth.verify_token(&token).unwrap(), identity);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let auth = authenticator_with_user("bobby", "password123").await;
        assert_matches!(auth.verify_token("not.a.jwt"), Err(CoreError::Unauthorized(_)));
    }
}
