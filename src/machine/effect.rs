//! One-shot effects emitted by the login state machine

/// A one-shot signal, delivered at most once per triggering event
///
/// Effects are not part of the state; a late subscriber never receives a
/// past effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEffect {
    /// Login succeeded; leave the screen
    NavigateToHome,
    /// Show a dismissible error banner with the given message
    ShowError(String),
}
