//! Admin account management commands.

use salon_admin_api::db::{AdminRepository, RepositoryError};
use salon_admin_api::services::auth::hash_password;
use salon_admin_core::Email;

use super::{CommandError, connect};

/// Create a new admin account with an argon2-hashed password.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let hash = hash_password(password).map_err(|e| CommandError::Hash(e.to_string()))?;

    let pool = connect().await?;

    tracing::info!("Creating admin: {}", email);
    let admin = AdminRepository::new(&pool)
        .create(&email, name, &hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CommandError::AdminExists(email.to_string()),
            other => CommandError::Repository(other),
        })?;

    tracing::info!("Admin created successfully! ID: {}", admin.id);
    Ok(())
}
