//! Authentication API client boundary
//!
//! The [`AuthApiClient`] trait is the seam between the repository and the
//! network. Implementations return the raw [`AuthResponse`] envelope or an
//! [`ApiError`] transport fault; classification into the flat user-facing
//! taxonomy happens once, at the repository boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};

pub mod http;

pub use http::HttpAuthApiClient;

/// Transport-level failure raised by an API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// DNS resolution or TCP/TLS connection failure
    #[error("connection failed: {0}")]
    Connect(String),

    /// The transport's connect/read deadline elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success HTTP status
    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    /// The response body could not be decoded as an [`AuthResponse`]
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Request/response calls against the remote authentication service
///
/// Implementations own the wire format and the HTTP specifics; callers treat
/// every operation as a plain request/response exchange that may fail with a
/// transport fault carrying an HTTP status code.
#[async_trait]
pub trait AuthApiClient: Send + Sync {
    /// `POST auth/login`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on connection failure, timeout, non-success
    /// HTTP status, or an undecodable response body.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST auth/register`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on connection failure, timeout, non-success
    /// HTTP status, or an undecodable response body.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// `POST auth/logout` with the current access token
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on connection failure, timeout, non-success
    /// HTTP status, or an undecodable response body.
    async fn logout(&self, access_token: &str) -> Result<AuthResponse, ApiError>;

    /// `POST auth/refresh`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on connection failure, timeout, non-success
    /// HTTP status, or an undecodable response body.
    async fn refresh_token(&self, request: &RefreshRequest) -> Result<AuthResponse, ApiError>;

    /// `GET auth/me` with the current access token
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on connection failure, timeout, non-success
    /// HTTP status, or an undecodable response body.
    async fn current_user(&self, access_token: &str) -> Result<AuthResponse, ApiError>;
}
