//! Authentication repository
//!
//! Orchestrates the API client and the token store and translates the
//! transport error domain into the flat user-facing taxonomy. This is the
//! only place transport failures are classified; layers above deal purely
//! in [`AuthError`] values.

use std::sync::Arc;

use crate::client::{ApiError, AuthApiClient};
use crate::errors::{AuthError, AuthResult};
use crate::models::{
    AuthResponse, AuthToken, Credentials, LoginRequest, RefreshRequest, RegisterRequest,
    UserProfile,
};
use crate::store::TokenStore;

/// Domain-level facade over the API client and token store
pub struct AuthRepository {
    api: Arc<dyn AuthApiClient>,
    store: Arc<dyn TokenStore>,
}

impl AuthRepository {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApiClient>, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    /// Access the underlying token store
    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Authenticate with an email/password pair
    ///
    /// On success the returned token pair is persisted before the profile is
    /// handed back; a token that cannot be persisted fails the whole login.
    ///
    /// # Errors
    ///
    /// `NetworkError` for transport faults, `InvalidCredentials` for a
    /// rejected login (including a success envelope missing its token),
    /// `ServerError`/`UserAlreadyExists` for other HTTP failures and
    /// `UnknownError` for undecodable responses or persistence faults.
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<UserProfile> {
        let request = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };

        match self.api.login(&request).await {
            Ok(response) => {
                if response.success && response.token.is_some() {
                    let profile = self.accept_session(&response).await?;
                    log::info!("user {} logged in", profile.id);
                    Ok(profile)
                } else {
                    Err(AuthError::InvalidCredentials)
                }
            }
            Err(e) => Err(Self::classify(&e)),
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// A non-success envelope maps to `ServerError` carrying the
    /// server-supplied message (code 400 unless the transport said
    /// otherwise); transport faults classify as for `login`.
    pub async fn register(&self, request: &RegisterRequest) -> AuthResult<UserProfile> {
        match self.api.register(request).await {
            Ok(response) => {
                if response.success && response.token.is_some() {
                    let profile = self.accept_session(&response).await?;
                    log::info!("user {} registered", profile.id);
                    Ok(profile)
                } else {
                    Err(AuthError::server_error(400, response.message))
                }
            }
            Err(e) => Err(Self::classify(&e)),
        }
    }

    /// End the current session
    ///
    /// The local token is cleared regardless of whether the remote call
    /// succeeds; the client must never believe it is still logged in after
    /// the user asked to log out. Always returns `Ok(())` once the local
    /// clear has run, so the operation is idempotent.
    ///
    /// # Errors
    ///
    /// None in practice; the signature keeps the boundary uniform.
    pub async fn logout(&self) -> AuthResult<()> {
        if let Ok(Some(token)) = self.store.get().await {
            if let Err(e) = self.api.logout(&token.access_token).await {
                log::warn!("remote logout failed, clearing local session anyway: {e}");
            }
        }

        if let Err(e) = self.store.clear().await {
            log::error!("failed to clear token store during logout: {e}");
        }
        Ok(())
    }

    /// Exchange the stored refresh token for a fresh access token
    ///
    /// On success the new token pair is persisted; when the response omits a
    /// refresh token the previously stored one is carried over so a later
    /// refresh still works.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when no refresh token is stored or the server
    /// rejects the exchange; transport faults classify as for `login`.
    pub async fn refresh_token(&self) -> AuthResult<String> {
        let stored = self
            .store
            .get()
            .await
            .map_err(|e| {
                log::error!("token store read failed: {e}");
                AuthError::UnknownError
            })?;
        let Some(current_refresh) = stored.as_ref().and_then(|t| t.refresh_token.clone()) else {
            return Err(AuthError::InvalidCredentials);
        };

        let request = RefreshRequest {
            refresh_token: current_refresh.clone(),
        };
        match self.api.refresh_token(&request).await {
            Ok(response) => {
                if !response.success {
                    return Err(AuthError::InvalidCredentials);
                }
                let Some(access_token) = response.token else {
                    return Err(AuthError::InvalidCredentials);
                };

                let refresh_token = response.refresh_token.or(Some(current_refresh));
                let token = match response.expires_in {
                    Some(expires_in) => {
                        AuthToken::with_expiry(access_token.clone(), refresh_token, expires_in)
                    }
                    None => AuthToken::new(access_token.clone(), refresh_token),
                };
                self.store.save(&token).await.map_err(|e| {
                    log::error!("failed to persist refreshed token: {e}");
                    AuthError::UnknownError
                })?;
                log::debug!("access token refreshed");
                Ok(access_token)
            }
            Err(e) => Err(Self::classify(&e)),
        }
    }

    /// Fetch the profile of the currently authenticated user
    ///
    /// A 401 triggers a single refresh-then-retry before the failure is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when no session is stored or the server rejects
    /// both the original call and the post-refresh retry; transport faults
    /// classify as for `login`.
    pub async fn current_user(&self) -> AuthResult<UserProfile> {
        let stored = self.store.get().await.map_err(|e| {
            log::error!("token store read failed: {e}");
            AuthError::UnknownError
        })?;
        let Some(token) = stored else {
            return Err(AuthError::InvalidCredentials);
        };

        match self.api.current_user(&token.access_token).await {
            Ok(response) => Self::profile_from(response),
            Err(ApiError::Status { code: 401, .. }) => {
                log::debug!("access token rejected, attempting refresh");
                let access_token = self.refresh_token().await?;
                match self.api.current_user(&access_token).await {
                    Ok(response) => Self::profile_from(response),
                    Err(e) => Err(Self::classify(&e)),
                }
            }
            Err(e) => Err(Self::classify(&e)),
        }
    }

    /// Persist the session carried by a success envelope and extract the profile
    async fn accept_session(&self, response: &AuthResponse) -> AuthResult<UserProfile> {
        let Some(access_token) = response.token.clone() else {
            return Err(AuthError::UnknownError);
        };
        let token = match response.expires_in {
            Some(expires_in) => {
                AuthToken::with_expiry(access_token, response.refresh_token.clone(), expires_in)
            }
            None => AuthToken::new(access_token, response.refresh_token.clone()),
        };

        self.store.save(&token).await.map_err(|e| {
            log::error!("failed to persist session token: {e}");
            AuthError::UnknownError
        })?;

        response.user.clone().ok_or_else(|| {
            log::error!("success envelope carried a token but no user profile");
            AuthError::UnknownError
        })
    }

    fn profile_from(response: AuthResponse) -> AuthResult<UserProfile> {
        if response.success {
            response.user.ok_or(AuthError::UnknownError)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Classify a transport fault into the flat taxonomy
    fn classify(error: &ApiError) -> AuthError {
        match error {
            ApiError::Connect(_) | ApiError::Timeout(_) => AuthError::NetworkError,
            ApiError::Status { code: 401, .. } => AuthError::InvalidCredentials,
            ApiError::Status { code: 409, .. } => AuthError::UserAlreadyExists,
            ApiError::Status { code, reason } => AuthError::server_error(*code, reason.clone()),
            ApiError::Decode(detail) => {
                log::error!("undecodable auth response: {detail}");
                AuthError::UnknownError
            }
        }
    }
}
