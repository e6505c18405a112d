//! Login screen state snapshot

use crate::errors::AuthError;

/// One immutable snapshot of the login screen
///
/// The implicit lifecycle (idle, submitting, terminal success/failure) is
/// carried by the `is_loading`/`is_login_successful`/`login_error` fields;
/// `is_loading` and `is_login_successful` are never both true.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub is_password_visible: bool,
    /// Field-level error rendered next to the email input
    pub email_error: Option<AuthError>,
    /// Field-level error rendered next to the password input
    pub password_error: Option<AuthError>,
    /// Submission error rendered as a dismissible banner
    pub login_error: Option<String>,
    pub is_login_successful: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = LoginState::default();
        assert!(state.email.is_empty());
        assert!(!state.is_loading);
        assert!(!state.is_login_successful);
        assert!(state.email_error.is_none());
        assert!(state.password_error.is_none());
        assert!(state.login_error.is_none());
    }
}
