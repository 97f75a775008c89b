//! Calendar event model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use salon_admin_core::{EventColor, EventId, UserId};

use super::user::User;

/// A calendar entry. `user_id` is optional: an event survives the deletion
/// of its owner with the reference cleared.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub color: EventColor,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A calendar entry with its owning staff member embedded (if any).
#[derive(Debug, Serialize)]
pub struct EventWithUser {
    #[serde(flatten)]
    pub event: Event,
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let event = Event {
            id: EventId::new("evt-1"),
            title: "Haircut".to_owned(),
            description: "Regular customer".to_owned(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            color: EventColor::Blue,
            user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(EventWithUser { event, user: None }).unwrap();
        assert_eq!(json["color"], "blue");
        assert!(json["userId"].is_null());
        assert!(json["startDate"].is_string());
        assert!(json["user"].is_null());
    }
}
