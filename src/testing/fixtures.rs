//! Pre-built test data

use chrono::{TimeZone, Utc};

use crate::client::ApiError;
use crate::models::{AuthResponse, UserProfile};
use crate::testing::constants::TEST_EMAIL;

/// The standard test user
///
/// # Panics
///
/// Panics if the hardcoded timestamp is invalid (should never happen)
#[must_use]
pub fn demo_profile() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        name: "Demo User".to_string(),
        email: TEST_EMAIL.to_string(),
        profile_image_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// A success envelope carrying the demo user and a token pair
#[must_use]
pub fn login_success() -> AuthResponse {
    AuthResponse {
        success: true,
        message: "ok".to_string(),
        user: Some(demo_profile()),
        token: Some("access-token-1".to_string()),
        refresh_token: Some("refresh-token-1".to_string()),
        expires_in: Some(3600),
    }
}

/// A rejected-credentials envelope (HTTP 200, success flag false)
#[must_use]
pub fn login_rejected() -> AuthResponse {
    AuthResponse {
        success: false,
        message: "Invalid email or password".to_string(),
        user: None,
        token: None,
        refresh_token: None,
        expires_in: None,
    }
}

/// A refresh envelope carrying a new access token
///
/// Pass `refresh_token: None` to simulate servers that rotate only the
/// access token.
#[must_use]
pub fn refresh_success(access_token: &str, refresh_token: Option<&str>) -> AuthResponse {
    AuthResponse {
        success: true,
        message: "ok".to_string(),
        user: None,
        token: Some(access_token.to_string()),
        refresh_token: refresh_token.map(ToString::to_string),
        expires_in: Some(3600),
    }
}

/// A connection-level transport fault
#[must_use]
pub fn connect_failure() -> ApiError {
    ApiError::Connect("connection refused".to_string())
}
