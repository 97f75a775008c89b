//! Staff member handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use salon_admin_core::UserId;

use super::{ApiResponse, ListQuery};
use crate::db::users::{UserChanges, sort_column};
use crate::db::UserRepository;
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::middleware::RequireAdmin;
use crate::models::UserWithEvents;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub picture_path: Option<String>,
}

/// Partial update. `picturePath` distinguishes absent (leave unchanged)
/// from explicit `null` (clear), hence the double `Option`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub picture_path: Option<Option<String>>,
}

/// Deleted-user acknowledgment body.
#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub id: UserId,
}

/// GET /api/v1/user
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<UserWithEvents>>>, AppError> {
    let filter = query.filter(sort_column)?;
    let users = UserRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ApiResponse::new(users)))
}

/// GET /api/v1/user/{id}
///
/// A missing id is `data: null`, not an error.
pub async fn get_one(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<Option<UserWithEvents>>>, AppError> {
    let user = UserRepository::new(state.pool()).get(&id).await?;

    Ok(Json(ApiResponse::new(user)))
}

/// POST /api/v1/user
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserWithEvents>>), AppError> {
    let user = UserRepository::new(state.pool())
        .create(payload.name, payload.picture_path)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(user, "User created successfully")),
    ))
}

/// PUT /api/v1/user/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserWithEvents>>, AppError> {
    let changes = UserChanges {
        name: payload.name,
        picture_path: payload.picture_path,
    };

    let user = UserRepository::new(state.pool())
        .update(&id, &changes)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::not_found("User not found"),
            other => other.into(),
        })?;

    Ok(Json(ApiResponse::with_message(
        user,
        "User updated successfully",
    )))
}

/// DELETE /api/v1/user/{id}
///
/// The member's events keep their rows and lose their owner.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<DeletedUser>>, AppError> {
    UserRepository::new(state.pool())
        .delete(&id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::not_found("User not found"),
            other => other.into(),
        })?;

    Ok(Json(ApiResponse::with_message(
        DeletedUser { id },
        "User deleted successfully",
    )))
}

/// Serde helper for `Option<Option<T>>` fields: absent stays `None`,
/// explicit `null` becomes `Some(None)`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_path_distinguishes_absent_from_null() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert!(absent.picture_path.is_none());

        let cleared: UpdateUserRequest =
            serde_json::from_str(r#"{"picturePath":null}"#).unwrap();
        assert_eq!(cleared.picture_path, Some(None));

        let set: UpdateUserRequest =
            serde_json::from_str(r#"{"picturePath":"/img/ana.png"}"#).unwrap();
        assert_eq!(set.picture_path, Some(Some("/img/ana.png".to_owned())));
    }

    #[test]
    fn create_request_rejects_empty_name() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
