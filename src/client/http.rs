//! Reqwest-backed authentication API client

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::client::{ApiError, AuthApiClient};
use crate::models::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::settings::ApiSettings;

/// HTTP implementation of [`AuthApiClient`]
///
/// One shared `reqwest::Client` per instance; connect and request timeouts
/// come from the API settings. Endpoints are resolved against the configured
/// base URL.
pub struct HttpAuthApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAuthApiClient {
    /// Build a client from API settings
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or the underlying
    /// HTTP client cannot be constructed.
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        // A trailing slash makes Url::join treat the last path segment as a
        // directory instead of replacing it.
        let normalized = if settings.base_url.ends_with('/') {
            settings.base_url.clone()
        } else {
            format!("{}/", settings.base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| anyhow::anyhow!("invalid API base URL {normalized:?}: {e}"))?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Connect(format!("invalid endpoint {path:?}: {e}")))
    }

    fn classify_send_error(error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(error.to_string())
        } else {
            // DNS failures, refused connections and TLS faults all surface
            // as connect errors; anything else send() produces is equally a
            // transport-level fault from the caller's point of view.
            ApiError::Connect(error.to_string())
        }
    }

    async fn decode(response: reqwest::Response) -> Result<AuthResponse, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<AuthResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        // Error bodies usually carry the same envelope; fish the server
        // message out of it when they do.
        let reason = serde_json::from_str::<AuthResponse>(&body)
            .ok()
            .map(|r| r.message)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Server error")
                    .to_string()
            });

        Err(ApiError::Status {
            code: status.as_u16(),
            reason,
        })
    }

    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        access_token: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint(path)?;
        log::debug!("POST {url}");

        let mut request = self.client.post(url).json(body);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AuthApiClient for HttpAuthApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/login", request, None).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/register", request, None).await
    }

    async fn logout(&self, access_token: &str) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/logout", &serde_json::json!({}), Some(access_token))
            .await
    }

    async fn refresh_token(&self, request: &RefreshRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("auth/refresh", request, None).await
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("auth/me")?;
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;
        Self::decode(response).await
    }
}
