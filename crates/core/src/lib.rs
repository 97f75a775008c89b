//! Salon Admin Core - shared domain types.
//!
//! This crate provides the types used across the salon admin components:
//!
//! - Type-safe entity IDs ([`AdminId`], [`UserId`], [`EventId`])
//! - [`Email`] value type with structural validation
//! - [`EventColor`] calendar tag enum
//!
//! The `sqlite` feature adds sqlx column bindings so these types can be
//! used directly in queries.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::color::EventColor;
pub use types::email::{Email, EmailError};
pub use types::id::{AdminId, EventId, UserId};
