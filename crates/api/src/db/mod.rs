//! Database access for the admin `SQLite` store.
//!
//! # Tables
//!
//! - `admins` - Credential store (login + guard checks)
//! - `users` - Staff members
//! - `events` - Calendar entries (nullable FK to `users`, `ON DELETE SET NULL`)
//! - `tower_sessions` - Session storage (managed by the session store)
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p salon-admin-cli -- migrate
//! ```

pub mod admins;
pub mod events;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use admins::AdminRepository;
pub use events::EventRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, missing referenced row).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Pagination, sorting, and search parameters for `find_many` queries.
///
/// `sort` carries a column name already checked against the entity's
/// whitelist; raw client input never reaches SQL here.
#[derive(Debug)]
pub struct ListFilter<'a> {
    pub search: Option<&'a str>,
    pub sort: Option<(&'static str, SortOrder)>,
    pub limit: i64,
    pub offset: i64,
}

/// Create a `SQLite` connection pool with foreign keys enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        // Required for ON DELETE SET NULL on events.user_id
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_sql() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn sort_order_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<SortOrder>(r#""desc""#).unwrap(),
            SortOrder::Desc
        );
        assert!(serde_json::from_str::<SortOrder>(r#""DESC""#).is_err());
    }
}
