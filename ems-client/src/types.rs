//! Navigation and page-state types.

use std::fmt;

/// Top-level page the front end should show next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Login / signup / reset page
    Login,
    /// Employee dashboard
    Dashboard,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Login => f.write_str("login"),
            Page::Dashboard => f.write_str("dashboard"),
        }
    }
}

/// Which form the auth page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPage {
    #[default]
    Login,
    Signup,
    ResetPassword,
}

impl AuthPage {
    /// Heading shown above the form
    pub fn heading(self) -> &'static str {
        match self {
            AuthPage::Login => "EMS Login",
            AuthPage::Signup => "Create EMS Account",
            AuthPage::ResetPassword => "Reset Password",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(AuthPage::default().heading(), "EMS Login");
        assert_eq!(AuthPage::Signup.heading(), "Create EMS Account");
        assert_eq!(AuthPage::ResetPassword.heading(), "Reset Password");
    }
}
