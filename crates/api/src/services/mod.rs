//! Business logic that does not belong in a single route handler.

pub mod auth;

pub use auth::AuthService;
