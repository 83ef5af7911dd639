//! User-facing notifications.

use std::fmt;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }
}

/// Dashboard action a toast reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeAction {
    Load,
    Create,
    Update,
    Delete,
}

impl EmployeeAction {
    pub fn success_message(self) -> &'static str {
        match self {
            EmployeeAction::Load => "Employees loaded",
            EmployeeAction::Create => "Employee added successfully!",
            EmployeeAction::Update => "Employee updated successfully!",
            EmployeeAction::Delete => "Employee deleted successfully!",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            EmployeeAction::Load => "Failed to load employees",
            EmployeeAction::Create => "Failed to add employee",
            EmployeeAction::Update => "Failed to update employee",
            EmployeeAction::Delete => "Failed to delete employee",
        }
    }
}

/// Transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Toast for a failed dashboard action
    pub fn failure(action: EmployeeAction, err: &ClientError) -> Self {
        match (action, err) {
            (_, ClientError::Validation(errors)) => Self::warning(errors.to_string()),
            (EmployeeAction::Load, _) => Self::error(
                "Failed to load employees. Please check your connection and try again.",
            ),
            (action, err) => Self::error(format!(
                "{}: {}",
                action.failure_prefix(),
                err.user_message()
            )),
        }
    }

    /// Toast for the result of a dashboard action
    pub fn for_result<T>(action: EmployeeAction, result: &ClientResult<T>) -> Self {
        match result {
            Ok(_) => Self::success(action.success_message()),
            Err(err) => Self::failure(action, err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ToastKind::Error | ToastKind::Warning)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormErrors;

    #[test]
    fn test_success_toasts() {
        let ok: ClientResult<()> = Ok(());
        let toast = Toast::for_result(EmployeeAction::Create, &ok);
        assert_eq!(toast, Toast::success("Employee added successfully!"));
        assert_eq!(toast.to_string(), "✔ Employee added successfully!");
        assert!(!toast.is_error());
    }

    #[test]
    fn test_failure_carries_server_text() {
        let err = ClientError::Status {
            status: 409,
            body: "Email already exists".into(),
        };
        let toast = Toast::failure(EmployeeAction::Update, &err);
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Failed to update employee: Email already exists");
    }

    #[test]
    fn test_load_failure_is_fixed_text() {
        let err = ClientError::Status {
            status: 500,
            body: "boom".into(),
        };
        let toast = Toast::failure(EmployeeAction::Load, &err);
        assert_eq!(
            toast.message,
            "Failed to load employees. Please check your connection and try again."
        );
    }

    #[test]
    fn test_validation_failure_is_warning() {
        let errors = FormErrors {
            email: Some("This email is already registered".into()),
            ..Default::default()
        };
        let toast = Toast::failure(EmployeeAction::Create, &ClientError::Validation(errors));
        assert_eq!(toast.kind, ToastKind::Warning);
        assert_eq!(toast.message, "email: This email is already registered");
        assert!(toast.is_error());
    }
}
