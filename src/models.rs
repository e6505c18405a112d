//! Core data model for the authentication flow
//!
//! Domain values (`Credentials`, `AuthToken`, `UserProfile`) and the wire
//! DTOs exchanged with the remote authentication API.

use std::fmt;

pub mod token;
pub mod user;
pub mod wire;

pub use token::AuthToken;
pub use user::UserProfile;
pub use wire::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};

/// A transient email/password pair
///
/// Never persisted as a unit; consumed by the login path and dropped.
/// The `Debug` implementation redacts the password so credentials can be
/// logged at debug level without leaking secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("demo@example.com", "password123");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("demo@example.com"));
        assert!(!rendered.contains("password123"));
        assert!(rendered.contains("<redacted>"));
    }
}
