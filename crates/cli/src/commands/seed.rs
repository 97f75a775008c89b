//! Initial data seeding.

use salon_admin_api::db::{AdminRepository, MIGRATOR, RepositoryError};
use salon_admin_api::services::auth::hash_password;
use salon_admin_core::Email;

use super::{CommandError, connect};

/// Email of the seeded admin account.
const SEED_ADMIN_EMAIL: &str = "admin@email.com";

/// Display name of the seeded admin account.
const SEED_ADMIN_NAME: &str = "Salão Top";

/// Provision the initial admin account. Runs migrations first so `seed`
/// works on a fresh database. Idempotent: re-running against an existing
/// admin reports and exits cleanly.
pub async fn run(password: &str) -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    let email = Email::parse(SEED_ADMIN_EMAIL)
        .map_err(|e| CommandError::InvalidEmail(e.to_string()))?;
    let hash = hash_password(password).map_err(|e| CommandError::Hash(e.to_string()))?;

    match AdminRepository::new(&pool)
        .create(&email, SEED_ADMIN_NAME, &hash)
        .await
    {
        Ok(admin) => {
            tracing::info!("Seeding completed. Admin ID: {}", admin.id);
            Ok(())
        }
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!("Seed admin already exists, nothing to do.");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}
