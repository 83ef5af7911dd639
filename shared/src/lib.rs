//! Shared types for the EMS client
//!
//! Wire models and request/response DTOs exchanged with the employee
//! management backend. Field names follow the backend's camelCase JSON.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{Employee, EmployeeDraft, EmployeeId};
pub use response::ErrorBody;
