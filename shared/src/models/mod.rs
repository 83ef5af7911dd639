//! Data models
//!
//! Mirrors of the backend DTOs. All IDs are `i64` (backend `Long`).

pub mod employee;

// Re-exports
pub use employee::*;
