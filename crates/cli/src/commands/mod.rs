//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::SqlitePool;
use thiserror::Error;

use salon_admin_api::config::{Config, ConfigError};
use salon_admin_api::db;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Repository(#[from] db::RepositoryError),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Admin already exists with email: {0}")]
    AdminExists(String),
}

/// Connect to the configured database.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    Ok(pool)
}
