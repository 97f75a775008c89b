//! Calendar event handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use salon_admin_core::{EventColor, EventId, UserId};

use super::{ApiResponse, ListQuery};
use crate::db::EventRepository;
use crate::db::events::{EventChanges, NewEvent, sort_column};
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::middleware::RequireAdmin;
use crate::models::EventWithUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

/// New event body. An unknown `color` fails deserialization before any
/// store access; an omitted one falls back to blue.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub color: EventColor,
    pub user_id: UserId,
}

/// Partial update. An omitted `color` leaves the stored one unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub color: Option<EventColor>,
    pub user_id: Option<UserId>,
}

/// GET /api/v1/event
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<EventWithUser>>>, AppError> {
    let filter = query.filter(sort_column)?;
    let events = EventRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ApiResponse::new(events)))
}

/// GET /api/v1/event/{id}
///
/// A missing id is `data: null`, not an error.
pub async fn get_one(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<Option<EventWithUser>>>, AppError> {
    let event = EventRepository::new(state.pool()).get(&id).await?;

    Ok(Json(ApiResponse::new(event)))
}

/// POST /api/v1/event
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EventWithUser>>), AppError> {
    let event = EventRepository::new(state.pool())
        .create(NewEvent {
            title: payload.title,
            description: payload.description,
            start_date: payload.start_date,
            end_date: payload.end_date,
            color: payload.color,
            user_id: payload.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            event,
            "Event created successfully",
        )),
    ))
}

/// PUT /api/v1/event/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    ValidatedJson(payload): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<ApiResponse<EventWithUser>>, AppError> {
    let changes = EventChanges {
        title: payload.title,
        description: payload.description,
        start_date: payload.start_date,
        end_date: payload.end_date,
        color: payload.color,
        user_id: payload.user_id,
    };

    let event = EventRepository::new(state.pool())
        .update(&id, &changes)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::not_found("Event not found"),
            other => other.into(),
        })?;

    Ok(Json(ApiResponse::with_message(
        event,
        "Event updated successfully",
    )))
}

/// DELETE /api/v1/event/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    EventRepository::new(state.pool())
        .delete(&id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::not_found("Event not found"),
            other => other.into(),
        })?;

    Ok(Json(ApiResponse::with_message(
        (),
        "Event deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_to_blue_when_omitted() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{
                "title": "Haircut",
                "description": "Walk-in",
                "startDate": "2025-06-01T10:00:00Z",
                "endDate": "2025-06-01T10:30:00Z",
                "userId": "usr-1"
            }"#,
        )
        .unwrap();
        assert_eq!(req.color, EventColor::Blue);
    }

    #[test]
    fn unknown_color_fails_deserialization() {
        let result = serde_json::from_str::<CreateEventRequest>(
            r#"{
                "title": "Haircut",
                "description": "Walk-in",
                "startDate": "2025-06-01T10:00:00Z",
                "endDate": "2025-06-01T10:30:00Z",
                "color": "magenta",
                "userId": "usr-1"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_user_id_fails_deserialization() {
        let result = serde_json::from_str::<CreateEventRequest>(
            r#"{
                "title": "Haircut",
                "description": "Walk-in",
                "startDate": "2025-06-01T10:00:00Z",
                "endDate": "2025-06-01T10:30:00Z"
            }"#,
        );
        assert!(result.is_err());
    }
}
