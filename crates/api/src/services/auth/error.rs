use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately a single variant so
    /// callers cannot leak which half failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing or verification failed in an unexpected way.
    #[error("password hashing error: {0}")]
    Hash(String),

    /// The credential store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The blocking verification task was cancelled or panicked.
    #[error("verification task failed: {0}")]
    TaskJoin(String),
}
