//! Domain models for the admin API.

pub mod admin;
pub mod event;
pub mod session;
pub mod user;

pub use admin::{Admin, AdminPrincipal};
pub use event::{Event, EventWithUser};
pub use session::session_keys;
pub use user::{User, UserWithEvents};
