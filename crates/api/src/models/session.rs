//! Session keys used by the admin console.

/// Keys under which values are stored in the session.
pub mod session_keys {
    /// The authenticated admin's id. The only authorization claim a session
    /// carries; the admin row is re-fetched on every guarded request.
    pub const ADMIN_ID: &str = "salon.admin_id";
}
