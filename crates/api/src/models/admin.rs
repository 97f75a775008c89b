//! Admin credential principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salon_admin_core::{AdminId, Email};

/// An admin record as stored in the credential store.
///
/// `password` holds the argon2 PHC hash, never the cleartext. The struct is
/// deliberately not `Serialize`: only [`AdminPrincipal`] crosses the wire.
#[derive(Clone)]
pub struct Admin {
    pub id: AdminId,
    pub email: Email,
    pub name: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Don't expose the hash in debug output
impl std::fmt::Debug for Admin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// The resolved caller injected into guarded handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPrincipal {
    pub id: AdminId,
    pub email: Email,
    pub name: String,
}

impl From<Admin> for AdminPrincipal {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }
}
