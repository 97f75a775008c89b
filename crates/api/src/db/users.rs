//! Staff member repository.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use salon_admin_core::UserId;

use super::{ListFilter, RepositoryError};
use crate::models::{Event, User, UserWithEvents};

/// Map a client-facing sort key to a real column, or reject it.
#[must_use]
pub fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "name" => Some("name"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

/// Partial changes for an update. `picture_path` distinguishes "leave
/// unchanged" (`None`) from "set to null" (`Some(None)`).
#[derive(Debug, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub picture_path: Option<Option<String>>,
}

/// Repository for staff members. Every read embeds the member's events
/// ordered by start date ascending, matching the response contract.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List staff members with pagination, search over `name`, and
    /// whitelisted sorting.
    pub async fn list(
        &self,
        filter: &ListFilter<'_>,
    ) -> Result<Vec<UserWithEvents>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, picture_path, created_at, updated_at FROM users",
        );

        if let Some(search) = filter.search {
            query.push(" WHERE name LIKE ");
            query.push_bind(format!("%{search}%"));
        }

        if let Some((column, order)) = filter.sort {
            query.push(" ORDER BY ");
            query.push(column);
            query.push(" ");
            query.push(order.as_sql());
        }

        query.push(" LIMIT ");
        query.push_bind(filter.limit);
        if filter.offset > 0 {
            query.push(" OFFSET ");
            query.push_bind(filter.offset);
        }

        let users: Vec<User> = query.build_query_as().fetch_all(self.pool).await?;
        let mut events = self.events_by_owner(&users).await?;

        Ok(users
            .into_iter()
            .map(|user| {
                let events = events.remove(&user.id).unwrap_or_default();
                UserWithEvents { user, events }
            })
            .collect())
    }

    /// Exact lookup. A missing id is an empty result, not an error.
    pub async fn get(&self, id: &UserId) -> Result<Option<UserWithEvents>, RepositoryError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, name, picture_path, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let events: Vec<Event> = sqlx::query_as(
            "SELECT id, title, description, start_date, end_date, color, user_id, \
                    created_at, updated_at \
             FROM events WHERE user_id = ? ORDER BY start_date ASC",
        )
        .bind(id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(Some(UserWithEvents { user, events }))
    }

    /// Persist a new staff member.
    pub async fn create(
        &self,
        name: String,
        picture_path: Option<String>,
    ) -> Result<UserWithEvents, RepositoryError> {
        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            name,
            picture_path,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO users (id, name, picture_path, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.picture_path)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool)
        .await?;

        Ok(UserWithEvents {
            user,
            events: Vec::new(),
        })
    }

    /// Apply partial changes in a single conditional `UPDATE`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no row has the given id;
    /// zero affected rows is the sole existence signal, there is no
    /// separate read-then-write window.
    pub async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<UserWithEvents, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE users SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(name) = &changes.name {
            query.push(", name = ");
            query.push_bind(name);
        }
        if let Some(picture_path) = &changes.picture_path {
            query.push(", picture_path = ");
            query.push_bind(picture_path.as_deref());
        }

        query.push(" WHERE id = ");
        query.push_bind(id.as_str());

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a staff member. The store's `ON DELETE SET NULL` policy clears
    /// `events.user_id`; the events themselves are kept.
    pub async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Fetch the events for a page of users in one query, grouped by owner.
    async fn events_by_owner(
        &self,
        users: &[User],
    ) -> Result<HashMap<UserId, Vec<Event>>, RepositoryError> {
        let mut grouped: HashMap<UserId, Vec<Event>> = HashMap::new();
        if users.is_empty() {
            return Ok(grouped);
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, title, description, start_date, end_date, color, user_id, \
                    created_at, updated_at \
             FROM events WHERE user_id IN (",
        );
        let mut ids = query.separated(", ");
        for user in users {
            ids.push_bind(user.id.as_str());
        }
        query.push(") ORDER BY start_date ASC");

        let events: Vec<Event> = query.build_query_as().fetch_all(self.pool).await?;
        for event in events {
            if let Some(owner) = event.user_id.clone() {
                grouped.entry(owner).or_default().push(event);
            }
        }

        Ok(grouped)
    }
}
