//! Employee form validation
//!
//! Every rule is checked independently so the caller can mark all failing
//! fields at once. Nothing here touches the network.

use std::fmt;

use shared::EmployeeDraft;

/// Minimum length of first and last names, after trimming
pub const MIN_NAME_LEN: usize = 2;

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const FIRST_NAME_TOO_SHORT: &str = "First name must be at least 2 characters";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const LAST_NAME_TOO_SHORT: &str = "Last name must be at least 2 characters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const EMAIL_TAKEN: &str = "This email is already registered";

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    /// Field name as used in the JSON payload
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field error messages; `None` means the field passed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Email => self.email.as_deref(),
        }
    }

    /// Failing fields in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        [Field::FirstName, Field::LastName, Field::Email]
            .into_iter()
            .filter_map(move |field| self.get(field).map(|msg| (field, msg)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

/// `local@domain.tld` shape: one `@`, no whitespace, a dot inside the domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // a '.' with at least one char on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_name(value: &str, required: &str, too_short: &str) -> Option<String> {
    if value.is_empty() {
        Some(required.to_string())
    } else if value.chars().count() < MIN_NAME_LEN {
        Some(too_short.to_string())
    } else {
        None
    }
}

/// Validate a draft.
///
/// `email_taken` is asked only for well-formed emails. On success the
/// trimmed draft is returned, ready to submit.
pub fn validate_draft<F>(draft: &EmployeeDraft, email_taken: F) -> Result<EmployeeDraft, FormErrors>
where
    F: Fn(&str) -> bool,
{
    let draft = draft.trimmed();

    let email = if draft.email.is_empty() {
        Some(EMAIL_REQUIRED.to_string())
    } else if !is_valid_email(&draft.email) {
        Some(EMAIL_INVALID.to_string())
    } else if email_taken(&draft.email) {
        Some(EMAIL_TAKEN.to_string())
    } else {
        None
    };

    let errors = FormErrors {
        first_name: check_name(&draft.first_name, FIRST_NAME_REQUIRED, FIRST_NAME_TOO_SHORT),
        last_name: check_name(&draft.last_name, LAST_NAME_REQUIRED, LAST_NAME_TOO_SHORT),
        email,
    };

    if errors.is_empty() { Ok(draft) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_taken(_: &str) -> bool {
        false
    }

    #[test]
    fn test_valid_draft_is_trimmed() {
        let draft = EmployeeDraft::new(" Ann ", " Lee ", " ann@lee.com ");
        let ok = validate_draft(&draft, never_taken).unwrap();
        assert_eq!(ok, EmployeeDraft::new("Ann", "Lee", "ann@lee.com"));
    }

    #[test]
    fn test_missing_first_name() {
        let draft = EmployeeDraft::new("", "Doe", "x@y.com");
        let errors = validate_draft(&draft, never_taken).unwrap_err();
        assert_eq!(errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get(Field::LastName), None);
        assert_eq!(errors.get(Field::Email), None);
    }

    #[test]
    fn test_all_violations_reported_together() {
        let draft = EmployeeDraft::new("A", "   ", "not-an-email");
        let errors = validate_draft(&draft, never_taken).unwrap_err();
        assert_eq!(errors.first_name.as_deref(), Some(FIRST_NAME_TOO_SHORT));
        assert_eq!(errors.last_name.as_deref(), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.email.as_deref(), Some(EMAIL_INVALID));
        assert_eq!(errors.iter().count(), 3);
        assert_eq!(
            errors.to_string(),
            "firstName: First name must be at least 2 characters; \
             lastName: Last name is required; \
             email: Please enter a valid email address"
        );
    }

    #[test]
    fn test_taken_email() {
        let draft = EmployeeDraft::new("Ann", "Lee", "A@L.com");
        let errors = validate_draft(&draft, |e| e.eq_ignore_ascii_case("a@l.com")).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(EMAIL_TAKEN));
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn test_taken_check_skipped_for_malformed_email() {
        let draft = EmployeeDraft::new("Ann", "Lee", "");
        let errors = validate_draft(&draft, |_| panic!("should not be consulted")).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@l.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("x@y.z"));
        assert!(!is_valid_email("a@lcom"));
        assert!(!is_valid_email("@l.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@l."));
        assert!(!is_valid_email("a@@l.com"));
        assert!(!is_valid_email("a b@l.com"));
        assert!(!is_valid_email("plainaddress"));
    }
}
