//! Staff member ("user") model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use salon_admin_core::UserId;

use super::event::Event;

/// A staff member.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub picture_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A staff member with their calendar events embedded, ordered by start
/// date ascending. This is the response shape of every user operation.
#[derive(Debug, Serialize)]
pub struct UserWithEvents {
    #[serde(flatten)]
    pub user: User,
    pub events: Vec<Event>,
}
