//! Core types for the salon admin application.

pub mod color;
pub mod email;
pub mod id;
