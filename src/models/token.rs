//! Authentication token pair
//!
//! The token pair is owned exclusively by the `TokenStore`; it is created on
//! successful login/register, replaced on refresh, and destroyed on logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Absolute expiry of the access token, when the server reported one
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    /// Create a token pair without expiry information
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: None,
        }
    }

    /// Create a token pair expiring `expires_in` seconds from now
    #[must_use]
    pub fn with_expiry(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in: u64,
    ) -> Self {
        let seconds = i64::try_from(expires_in).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: Some(expires_at),
        }
    }

    /// Whether the access token has passed its reported expiry
    ///
    /// Tokens without expiry information are treated as live; the server is
    /// the authority and will answer 401 if it disagrees.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}
