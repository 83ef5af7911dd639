//! Employee Model

use serde::{Deserialize, Serialize};

/// Backend-assigned employee identifier
pub type EmployeeId = i64;

/// Employee record as returned by `/api/employees`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on first name, last name or email.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Create / update payload (`{firstName, lastName, email}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_format() {
        let json = r#"{"id":1,"firstName":"Ann","lastName":"Lee","email":"a@l.com"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 1);
        assert_eq!(employee.full_name(), "Ann Lee");

        let draft = EmployeeDraft::from(&employee);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"firstName": "Ann", "lastName": "Lee", "email": "a@l.com"})
        );
    }

    #[test]
    fn test_matches_lowercase() {
        let employee = Employee {
            id: 7,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "GHopper@Navy.mil".into(),
        };
        assert!(employee.matches_lowercase("grace"));
        assert!(employee.matches_lowercase("opp"));
        assert!(employee.matches_lowercase("navy.mil"));
        assert!(!employee.matches_lowercase("turing"));
    }

    #[test]
    fn test_draft_trimmed() {
        let draft = EmployeeDraft::new("  Ann ", "Lee\t", " a@l.com ");
        assert_eq!(draft.trimmed(), EmployeeDraft::new("Ann", "Lee", "a@l.com"));
    }
}
