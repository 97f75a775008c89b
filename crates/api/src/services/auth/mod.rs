//! Credential verification for the admin login flow.
//!
//! Verification runs on the blocking pool: argon2 at default parameters
//! takes tens of milliseconds and would stall the async executor.

mod error;
mod password;

use sqlx::SqlitePool;

use salon_admin_core::Email;

use crate::db::AdminRepository;
use crate::models::Admin;

pub use error::AuthError;
pub use password::{hash_password, verify_password};

/// Verifies admin credentials against the credential store.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Check a login attempt and return the matching admin.
    ///
    /// Unknown email and wrong password both return
    /// [`AuthError::InvalidCredentials`], and the unknown-email path still
    /// performs one argon2 verification against a dummy hash so the two
    /// cases are not distinguishable by response time.
    pub async fn authenticate(&self, email: &Email, password: &str) -> Result<Admin, AuthError> {
        let repo = AdminRepository::new(self.pool);
        let admin = repo.get_by_email(email).await?;

        let password = password.to_owned();
        let hash = admin
            .as_ref()
            .map_or_else(|| password::DUMMY_HASH.clone(), |a| a.password.clone());

        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::TaskJoin(e.to_string()))?;

        match (verified, admin) {
            (Ok(()), Some(admin)) => Ok(admin),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
