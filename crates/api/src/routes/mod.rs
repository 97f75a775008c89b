//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Auth
//! POST /api/v1/auth             - Login (email + password, sets session cookie)
//! POST /api/v1/auth/logout      - Logout (destroys the session)
//!
//! # Staff members (admin session required)
//! GET    /api/v1/user           - List (page, limit, sortBy, sortOrder, search)
//! GET    /api/v1/user/{id}      - Get one (data: null when missing)
//! POST   /api/v1/user           - Create
//! PUT    /api/v1/user/{id}      - Partial update
//! DELETE /api/v1/user/{id}      - Delete (owned events keep rows, lose owner)
//!
//! # Calendar events (admin session required)
//! GET    /api/v1/event          - List (same query shape)
//! GET    /api/v1/event/{id}     - Get one (data: null when missing)
//! POST   /api/v1/event          - Create
//! PUT    /api/v1/event/{id}     - Partial update
//! DELETE /api/v1/event/{id}     - Delete
//! ```

pub mod auth;
pub mod events;
pub mod users;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::db::{ListFilter, SortOrder};
use crate::error::AppError;
use crate::state::AppState;

/// Default page size when the client sends no `limit`.
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Uniform success envelope: `{"data": ..., "message"?: ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Query parameters shared by both list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Resolve the query into repository filter terms.
    ///
    /// `sort_column` is the entity's whitelist; an unknown `sortBy` is a
    /// validation error and never reaches SQL. The offset applies only from
    /// the second page on. Non-positive `page`/`limit` and page numbers
    /// whose offset would not fit in an `i64` are rejected.
    pub fn filter(
        &self,
        sort_column: fn(&str) -> Option<&'static str>,
    ) -> Result<ListFilter<'_>, AppError> {
        let sort = match &self.sort_by {
            Some(key) => {
                let column = sort_column(key)
                    .ok_or_else(|| AppError::invalid_field("sortBy", "unknown sort key"))?;
                Some((column, self.sort_order.unwrap_or_default()))
            }
            None => None,
        };

        let limit = match self.limit {
            Some(limit) if limit < 1 => {
                return Err(AppError::invalid_field("limit", "limit must be at least 1"));
            }
            Some(limit) => limit,
            None => DEFAULT_PAGE_SIZE,
        };
        let offset = match self.page {
            Some(page) if page < 1 => {
                return Err(AppError::invalid_field("page", "page must be at least 1"));
            }
            // page >= 2 here, so the subtraction cannot wrap; the multiply
            // can, on hostile input.
            Some(page) if page > 1 => (page - 1)
                .checked_mul(limit)
                .ok_or_else(|| AppError::invalid_field("page", "page is out of range"))?,
            _ => 0,
        };

        Ok(ListFilter {
            search: self.search.as_deref().filter(|s| !s.is_empty()),
            sort,
            limit,
            offset,
        })
    }
}

/// Build the application router. Middleware layers are attached in
/// [`crate::app`].
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/api/v1/auth", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .nest("/api/v1/user", users::routes())
        .nest("/api/v1/event", events::routes())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness: the process is only useful if the database answers.
async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => Ok(Json(serde_json::json!({ "status": "ready" }))),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users::sort_column;

    fn query(page: Option<i64>, limit: Option<i64>) -> ListQuery {
        ListQuery {
            page,
            limit,
            ..ListQuery::default()
        }
    }

    #[test]
    fn defaults_to_ten_per_page_without_offset() {
        let q = query(None, None);
        let filter = q.filter(sort_column).unwrap();
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn first_page_has_no_offset() {
        let q = query(Some(1), Some(25));
        let filter = q.filter(sort_column).unwrap();
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn later_pages_skip_prior_pages() {
        let q = query(Some(3), Some(20));
        let filter = q.filter(sort_column).unwrap();
        assert_eq!(filter.offset, 40);
    }

    #[test]
    fn huge_page_numbers_are_rejected_not_wrapped() {
        let q = query(Some(i64::MAX), Some(10));
        let err = q.filter(sort_column).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn non_positive_page_and_limit_are_rejected() {
        for q in [query(Some(0), None), query(Some(-1), None)] {
            let err = q.filter(sort_column).unwrap_err();
            assert_eq!(err.kind(), "validation_error");
        }
        for q in [query(None, Some(0)), query(None, Some(-5))] {
            let err = q.filter(sort_column).unwrap_err();
            assert_eq!(err.kind(), "validation_error");
        }
    }

    #[test]
    fn unknown_sort_key_is_a_validation_error() {
        let q = ListQuery {
            sort_by: Some("password".to_owned()),
            ..ListQuery::default()
        };
        let err = q.filter(sort_column).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn empty_search_is_ignored() {
        let q = ListQuery {
            search: Some(String::new()),
            ..ListQuery::default()
        };
        let filter = q.filter(sort_column).unwrap();
        assert!(filter.search.is_none());
    }
}
