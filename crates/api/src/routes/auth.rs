//! Login and logout handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

use salon_admin_core::Email;

use super::ApiResponse;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::middleware::auth::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::AdminPrincipal;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// POST /api/v1/auth
///
/// Verifies credentials and establishes a session. The response body never
/// contains the password hash.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AdminPrincipal>>, AppError> {
    let email =
        Email::parse(&payload.email).map_err(|e| AppError::invalid_field("email", e.to_string()))?;

    let admin = AuthService::new(state.pool())
        .authenticate(&email, &payload.password)
        .await?;

    // New session id on privilege change
    session.cycle_id().await.map_err(internal)?;
    set_current_admin(&session, &admin.id)
        .await
        .map_err(internal)?;

    tracing::info!(admin = %admin.id, "admin logged in");

    Ok(Json(ApiResponse::with_message(
        AdminPrincipal::from(admin),
        "Logged in successfully",
    )))
}

/// POST /api/v1/auth/logout
///
/// Destroys the session. Requires a live admin session; anonymous callers
/// get the same `unauthenticated` envelope as any other guarded route.
pub async fn logout(
    RequireAdmin(admin): RequireAdmin,
    session: Session,
) -> Result<Json<ApiResponse<()>>, AppError> {
    clear_current_admin(&session).await.map_err(internal)?;

    tracing::info!(admin = %admin.id, "admin logged out");

    Ok(Json(ApiResponse::with_message(
        (),
        "Logged out successfully",
    )))
}

fn internal(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store failure: {e}"))
}
