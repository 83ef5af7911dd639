//! EMS Client - front end for the employee management backend
//!
//! Talks to the REST API (`/api/employees`, `/auth/*`), keeps the local
//! employee list in sync, validates forms and manages the stored session.

pub mod auth;
pub mod client;
pub mod config;
pub mod employees;
pub mod error;
pub mod render;
pub mod session;
pub mod toast;
pub mod types;
pub mod validation;
pub mod view_model;

pub use auth::{AuthAction, AuthOutcome, AuthService};
pub use client::{HttpClient, NetworkHttpClient};
pub use config::{AuthMode, ClientConfig};
pub use employees::EmployeeApi;
pub use error::{ClientError, ClientResult};
pub use render::{ListView, RenderStyle};
pub use session::{
    FileSessionStore, GateDecision, MemorySessionStore, Session, SessionStore, check_gate, logout,
};
pub use toast::{EmployeeAction, Toast, ToastKind};
pub use types::{AuthPage, Page};
pub use validation::{Field, FormErrors};
pub use view_model::{EmployeeViewModel, LoadState, Modal};

// Re-export shared types for convenience
pub use shared::{Employee, EmployeeDraft, EmployeeId};
