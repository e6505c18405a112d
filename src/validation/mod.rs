//! Input validation for the login and registration flows
//!
//! Pure, synchronous predicates with no side effects. Validation failures are
//! resolved in the use-case layer and never reach the network; the state
//! machine additionally runs the email/password checks synchronously so both
//! field errors can be surfaced in a single snapshot.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AuthError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum accepted display-name length (registration)
pub const MIN_NAME_LEN: usize = 2;

// local@domain with at least one dot in the domain part
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email pattern is a valid regex")
});

/// Validate an email address
///
/// Returns `None` when the address passes, otherwise the failing kind:
/// [`AuthError::EmptyEmail`] for blank input, [`AuthError::InvalidEmailFormat`]
/// when the input does not match the `local@domain.tld` grammar.
#[must_use]
pub fn validate_email(email: &str) -> Option<AuthError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some(AuthError::EmptyEmail);
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Some(AuthError::InvalidEmailFormat);
    }
    None
}

/// Validate a password against the login rules
///
/// Blank input fails with [`AuthError::EmptyPassword`]; anything shorter than
/// [`MIN_PASSWORD_LEN`] characters fails with [`AuthError::WeakPassword`].
#[must_use]
pub fn validate_password(password: &str) -> Option<AuthError> {
    if password.trim().is_empty() {
        return Some(AuthError::EmptyPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(AuthError::WeakPassword);
    }
    None
}

/// Validate a password against the stricter registration rules
///
/// On top of the login rules, a registration password must contain at least
/// one digit and at least one letter.
#[must_use]
pub fn validate_registration_password(password: &str) -> Option<AuthError> {
    if let Some(error) = validate_password(password) {
        return Some(error);
    }
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_letter = password.chars().any(char::is_alphabetic);
    if !(has_digit && has_letter) {
        return Some(AuthError::WeakPassword);
    }
    None
}

/// Validate a complete registration form
///
/// Checks run in a fixed order (name, email, password presence/length,
/// confirmation, strength) and short-circuit on the first failure; callers
/// never receive an aggregate.
#[must_use]
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Option<AuthError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Some(AuthError::NameTooShort);
    }
    if let Some(error) = validate_email(email) {
        return Some(error);
    }
    if let Some(error) = validate_password(password) {
        return Some(error);
    }
    if password != confirm_password {
        return Some(AuthError::PasswordMismatch);
    }
    validate_registration_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_emails_are_rejected() {
        for email in ["", "   ", "\t"] {
            assert_eq!(validate_email(email), Some(AuthError::EmptyEmail));
        }
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for email in [
            "bad",
            "no-at-sign.com",
            "user@",
            "@example.com",
            "user@domain",
            "user@domain.",
            "user name@example.com",
            "user@exa mple.com",
        ] {
            assert_eq!(
                validate_email(email),
                Some(AuthError::InvalidEmailFormat),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_well_formed_emails_pass() {
        for email in [
            "demo@example.com",
            "first.last@example.co.uk",
            "user+tag@sub.domain.org",
            "  padded@example.com  ",
        ] {
            assert_eq!(validate_email(email), None, "expected {email:?} to pass");
        }
    }

    #[test]
    fn test_short_passwords_are_weak() {
        assert_eq!(validate_password(""), Some(AuthError::EmptyPassword));
        assert_eq!(validate_password("x"), Some(AuthError::WeakPassword));
        assert_eq!(validate_password("12345"), Some(AuthError::WeakPassword));
        assert_eq!(validate_password("123456"), None);
    }

    #[test]
    fn test_registration_password_needs_digit_and_letter() {
        assert_eq!(
            validate_registration_password("letters"),
            Some(AuthError::WeakPassword)
        );
        assert_eq!(
            validate_registration_password("1234567"),
            Some(AuthError::WeakPassword)
        );
        assert_eq!(validate_registration_password("abc123"), None);
    }

    #[test]
    fn test_registration_short_circuits_in_order() {
        // Name checked before everything else
        assert_eq!(
            validate_registration("A", "bad", "x", "y"),
            Some(AuthError::NameTooShort)
        );
        // Email checked before password
        assert_eq!(
            validate_registration("Ann", "bad", "x", "y"),
            Some(AuthError::InvalidEmailFormat)
        );
        // Confirmation checked before strength
        assert_eq!(
            validate_registration("Ann", "a@b.com", "abc123", "xyz999"),
            Some(AuthError::PasswordMismatch)
        );
        // Strength last
        assert_eq!(
            validate_registration("Ann", "a@b.com", "letters", "letters"),
            Some(AuthError::WeakPassword)
        );
        assert_eq!(
            validate_registration("Ann", "a@b.com", "abc123", "abc123"),
            None
        );
    }

    #[test]
    fn test_name_is_trimmed_before_length_check() {
        assert_eq!(
            validate_registration("  A  ", "a@b.com", "abc123", "abc123"),
            Some(AuthError::NameTooShort)
        );
        assert_eq!(
            validate_registration("  Al ", "a@b.com", "abc123", "abc123"),
            None
        );
    }
}
