//! User profile returned by the authentication API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable profile of the authenticated user
///
/// Produced by a successful login/register/current-user response; held only
/// inside response values and never persisted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_through_json() {
        let json = r#"{
            "id": "user-42",
            "name": "Demo User",
            "email": "demo@example.com",
            "created_at": "2024-03-01T12:00:00Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "user-42");
        assert!(profile.profile_image_url.is_none());

        let rendered = serde_json::to_string(&profile).unwrap();
        assert!(!rendered.contains("profile_image_url"));
    }
}
