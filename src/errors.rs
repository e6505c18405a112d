//! Error taxonomy for the authentication core
//!
//! Every repository and use-case boundary returns [`AuthResult`]. Failures
//! travel as values; nothing panics across these boundaries. Validation
//! failures are produced locally by the `validation` module, transport and
//! server failures are classified once at the repository boundary.

use thiserror::Error;

/// Result alias used at every repository/use-case boundary
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Flat error taxonomy for the whole authentication flow
///
/// Field-level validation kinds (`EmptyEmail` through `PasswordMismatch`)
/// never reach the network; the remaining kinds are produced by classifying
/// transport and server failures. The `Display` string of each kind is the
/// user-facing message rendered by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Email is required")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password is required")]
    EmptyPassword,

    #[error("Password is too weak")]
    WeakPassword,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Network connection failed")]
    NetworkError,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists with this email")]
    UserAlreadyExists,

    #[error("{message}")]
    ServerError { code: u16, message: String },

    #[error("An unknown error occurred")]
    UnknownError,
}

impl AuthError {
    /// Create a server error carrying the server-supplied code and message
    #[must_use]
    pub fn server_error(code: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            code,
            message: message.into(),
        }
    }

    /// Whether this kind was produced by local input validation
    ///
    /// Validation failures are resolved in the use-case layer and never
    /// correspond to a network round trip.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyEmail
                | Self::InvalidEmailFormat
                | Self::EmptyPassword
                | Self::WeakPassword
                | Self::NameTooShort
                | Self::PasswordMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_are_user_facing() {
        assert_eq!(AuthError::EmptyEmail.to_string(), "Email is required");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::NetworkError.to_string(),
            "Network connection failed"
        );
    }

    #[test]
    fn test_server_error_displays_server_message() {
        let err = AuthError::server_error(503, "Service temporarily unavailable");
        assert_eq!(err.to_string(), "Service temporarily unavailable");
        assert_eq!(
            err,
            AuthError::ServerError {
                code: 503,
                message: "Service temporarily unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_validation_kinds_are_flagged() {
        assert!(AuthError::EmptyEmail.is_validation());
        assert!(AuthError::PasswordMismatch.is_validation());
        assert!(!AuthError::NetworkError.is_validation());
        assert!(!AuthError::server_error(500, "boom").is_validation());
    }
}
