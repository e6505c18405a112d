//! Intents accepted by the login state machine

/// A discrete user/system action, consumed one at a time in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIntent {
    /// Reset the screen to its default state
    LoadScreen,
    /// The email input changed; clears the email and submission errors
    EmailChanged(String),
    /// The password input changed; clears the password and submission errors
    PasswordChanged(String),
    /// Submit the form; validates first, then runs the login asynchronously
    LoginClicked,
    /// Flip the password visibility toggle
    TogglePasswordVisibility,
}
