//! Admin credential repository.
//!
//! Admins are provisioned out-of-band (CLI seed), read during login and on
//! every guarded request, and have no HTTP mutation surface.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use salon_admin_core::{AdminId, Email};

use super::RepositoryError;
use crate::models::Admin;

/// Internal row type for admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: AdminId,
    email: String,
    name: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for the credential store.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an admin by id. Used by the authorization guard on every request.
    pub async fn get_by_id(&self, id: &AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, email, name, password, created_at, updated_at \
             FROM admins WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an admin by login email.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Admin>, RepositoryError> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, email, name, password, created_at, updated_at \
             FROM admins WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new admin. `password_hash` must already be an argon2 PHC
    /// string; this layer never sees cleartext.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let now = Utc::now();
        let id = AdminId::generate();

        sqlx::query(
            "INSERT INTO admins (id, email, name, password, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(email.as_str())
        .bind(name)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Admin {
            id,
            email: email.clone(),
            name: name.to_owned(),
            password: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Delete an admin by id. Sessions referencing it become stale and are
    /// rejected by the guard on their next request.
    pub async fn delete(&self, id: &AdminId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
