//! Calendar event repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use salon_admin_core::{EventColor, EventId, UserId};

use super::{ListFilter, RepositoryError};
use crate::models::{Event, EventWithUser, User};

/// Map a client-facing sort key to a real column, or reject it.
#[must_use]
pub fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "title" => Some("title"),
        "description" => Some("description"),
        "startDate" => Some("start_date"),
        "endDate" => Some("end_date"),
        "color" => Some("color"),
        "userId" => Some("user_id"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

/// Fields of a new calendar entry, already validated at the router.
#[derive(Debug)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub color: EventColor,
    pub user_id: UserId,
}

/// Partial changes for an update; omitted fields stay unchanged.
#[derive(Debug, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub color: Option<EventColor>,
    pub user_id: Option<UserId>,
}

/// Repository for calendar entries. Reads embed the owning staff member.
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List events with pagination, search over title/description/owner id,
    /// and whitelisted sorting.
    pub async fn list(
        &self,
        filter: &ListFilter<'_>,
    ) -> Result<Vec<EventWithUser>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, title, description, start_date, end_date, color, user_id, \
                    created_at, updated_at \
             FROM events",
        );

        if let Some(search) = filter.search {
            let pattern = format!("%{search}%");
            query.push(" WHERE (title LIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR description LIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR user_id LIKE ");
            query.push_bind(pattern);
            query.push(")");
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

        let events: Vec<Event> = query.build_query_as().fetch_all(self.pool).await?;
        let owners = self.owners_of(&events).await?;

        Ok(events
            .into_iter()
            .map(|event| {
                let user = event
                    .user_id
                    .as_ref()
                    .and_then(|id| owners.get(id).cloned());
                EventWithUser { event, user }
            })
            .collect())
    }

    /// Exact lookup. A missing id is an empty result, not an error.
    pub async fn get(&self, id: &EventId) -> Result<Option<EventWithUser>, RepositoryError> {
        let event: Option<Event> = sqlx::query_as(
            "SELECT id, title, description, start_date, end_date, color, user_id, \
                    created_at, updated_at \
             FROM events WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(event) = event else {
            return Ok(None);
        };

        let user = match &event.user_id {
            Some(user_id) => self.owner(user_id).await?,
            None => None,
        };

        Ok(Some(EventWithUser { event, user }))
    }

    /// Persist a new calendar entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `user_id` references no
    /// staff member.
    pub async fn create(&self, new: NewEvent) -> Result<EventWithUser, RepositoryError> {
        let now = Utc::now();
        let id = EventId::generate();

        sqlx::query(
            "INSERT INTO events (id, title, description, start_date, end_date, color, \
                                 user_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.color)
        .bind(new.user_id.as_str())
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(map_foreign_key)?;

        self.get(&id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply partial changes in a single conditional `UPDATE`; zero affected
    /// rows means the target is gone and maps to `NotFound`.
    pub async fn update(
        &self,
        id: &EventId,
        changes: &EventChanges,
    ) -> Result<EventWithUser, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE events SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(title) = &changes.title {
            query.push(", title = ");
            query.push_bind(title);
        }
        if let Some(description) = &changes.description {
            query.push(", description = ");
            query.push_bind(description);
        }
        if let Some(start_date) = changes.start_date {
            query.push(", start_date = ");
            query.push_bind(start_date);
        }
        if let Some(end_date) = changes.end_date {
            query.push(", end_date = ");
            query.push_bind(end_date);
        }
        if let Some(color) = changes.color {
            query.push(", color = ");
            query.push_bind(color);
        }
        if let Some(user_id) = &changes.user_id {
            query.push(", user_id = ");
            query.push_bind(user_id.as_str());
        }

        query.push(" WHERE id = ");
        query.push_bind(id.as_str());

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(map_foreign_key)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a calendar entry.
    pub async fn delete(&self, id: &EventId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Fetch the owners of a page of events in one query.
    async fn owners_of(
        &self,
        events: &[Event],
    ) -> Result<HashMap<UserId, User>, RepositoryError> {
        let mut owners = HashMap::new();
        let ids: Vec<&str> = events
            .iter()
            .filter_map(|e| e.user_id.as_ref().map(UserId::as_str))
            .collect();
        if ids.is_empty() {
            return Ok(owners);
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, picture_path, created_at, updated_at FROM users WHERE id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        query.push(")");

        let users: Vec<User> = query.build_query_as().fetch_all(self.pool).await?;
        for user in users {
            owners.insert(user.id.clone(), user);
        }

        Ok(owners)
    }

    async fn owner(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, name, picture_path, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}

fn map_foreign_key(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict("referenced user does not exist".to_owned());
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_are_whitelisted() {
        assert_eq!(sort_column("startDate"), Some("start_date"));
        assert_eq!(sort_column("endDate"), Some("end_date"));
        assert_eq!(sort_column("title"), Some("title"));
        assert_eq!(sort_column("userId"), Some("user_id"));
        assert_eq!(sort_column("start_date"), None);
        assert_eq!(sort_column("user_id"), None);
    }
}
