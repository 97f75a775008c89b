//! Database migration command.

use salon_admin_api::db::MIGRATOR;

use super::{CommandError, connect};

/// Run the embedded migrations against the configured database.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
