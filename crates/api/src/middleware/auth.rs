//! Authorization guard for admin-only routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use salon_admin_core::AdminId;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::models::{AdminPrincipal, session_keys};
use crate::state::AppState;

/// Extractor that requires an authenticated admin.
///
/// The session only carries the admin id; the admin row is re-fetched on
/// every request so that sessions for deleted admins stop working
/// immediately, not at cookie expiry.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub AdminPrincipal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AppError::Unauthenticated)?;

        let admin_id: AdminId = session
            .get(session_keys::ADMIN_ID)
            .await
            .ok()
            .flatten()
            .ok_or(AppError::Unauthenticated)?;

        let admin = AdminRepository::new(state.pool())
            .get_by_id(&admin_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self(AdminPrincipal::from(admin)))
    }
}

/// Store the admin id in the session after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin_id: &AdminId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_ID, admin_id).await
}

/// Destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the backing store fails.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
