use crate::credentials::RegistrationError;
use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every failure a request can end in is one of these variants. The HTTP
/// layer maps each variant to a status code; nothing matches on messages.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Registration input was rejected by the credential validator.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("The `id` is not valid")]
    InvalidId,

    #[error("Missing `title` in request body")]
    MissingTitle,

    /// The referenced folder does not exist or belongs to another user.
    #[error("The `folderId` is not valid")]
    InvalidFolder,

    /// At least one referenced tag does not exist or belongs to another user.
    #[error("The `tags` array contains an invalid id")]
    InvalidTag,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("The username already exists")]
    DuplicateUsername,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Absent, or owned by someone else. The two cases are never told apart.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Login was attempted without a username or password.
    #[error("Bad Request")]
    MissingCredentials,

    /// Covers both an unknown username and a wrong password.
    #[error("Unauthorized")]
    AuthenticationDenied,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
