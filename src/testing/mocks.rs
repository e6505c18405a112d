//! Mock collaborators for isolated testing

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::client::{ApiError, AuthApiClient};
use crate::models::{AuthResponse, AuthToken, LoginRequest, RefreshRequest, RegisterRequest};
use crate::store::TokenStore;

type Queued = Mutex<VecDeque<Result<AuthResponse, ApiError>>>;

// Test doubles do not care about poisoning; a panicking test already failed.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Programmable [`AuthApiClient`] double
///
/// Responses are queued per endpoint and served in order; every call is
/// recorded so tests can assert on request counts and payloads. An endpoint
/// hit with an empty queue panics, failing the test loudly.
pub struct MockAuthApiClient {
    login_responses: Queued,
    register_responses: Queued,
    logout_responses: Queued,
    refresh_responses: Queued,
    current_user_responses: Queued,

    login_requests: Mutex<Vec<LoginRequest>>,
    register_requests: Mutex<Vec<RegisterRequest>>,
    refresh_requests: Mutex<Vec<RefreshRequest>>,
    logout_tokens: Mutex<Vec<String>>,
    current_user_tokens: Mutex<Vec<String>>,

    login_gated: AtomicBool,
    login_gate: Semaphore,
}

impl Default for MockAuthApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthApiClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            login_responses: Mutex::default(),
            register_responses: Mutex::default(),
            logout_responses: Mutex::default(),
            refresh_responses: Mutex::default(),
            current_user_responses: Mutex::default(),
            login_requests: Mutex::default(),
            register_requests: Mutex::default(),
            refresh_requests: Mutex::default(),
            logout_tokens: Mutex::default(),
            current_user_tokens: Mutex::default(),
            login_gated: AtomicBool::new(false),
            login_gate: Semaphore::new(0),
        }
    }

    pub fn queue_login(&self, response: Result<AuthResponse, ApiError>) {
        lock(&self.login_responses).push_back(response);
    }

    pub fn queue_register(&self, response: Result<AuthResponse, ApiError>) {
        lock(&self.register_responses).push_back(response);
    }

    pub fn queue_logout(&self, response: Result<AuthResponse, ApiError>) {
        lock(&self.logout_responses).push_back(response);
    }

    pub fn queue_refresh(&self, response: Result<AuthResponse, ApiError>) {
        lock(&self.refresh_responses).push_back(response);
    }

    pub fn queue_current_user(&self, response: Result<AuthResponse, ApiError>) {
        lock(&self.current_user_responses).push_back(response);
    }

    /// Login request bodies seen so far
    #[must_use]
    pub fn login_requests(&self) -> Vec<LoginRequest> {
        lock(&self.login_requests).clone()
    }

    /// Register request bodies seen so far
    #[must_use]
    pub fn register_requests(&self) -> Vec<RegisterRequest> {
        lock(&self.register_requests).clone()
    }

    /// Refresh request bodies seen so far
    #[must_use]
    pub fn refresh_requests(&self) -> Vec<RefreshRequest> {
        lock(&self.refresh_requests).clone()
    }

    /// Bearer tokens presented to `logout`
    #[must_use]
    pub fn logout_tokens(&self) -> Vec<String> {
        lock(&self.logout_tokens).clone()
    }

    /// Bearer tokens presented to `current_user`
    #[must_use]
    pub fn current_user_tokens(&self) -> Vec<String> {
        lock(&self.current_user_tokens).clone()
    }

    /// Make subsequent `login` calls block until [`Self::release_login`]
    ///
    /// Lets tests keep a login observably in flight while they poke at the
    /// state machine.
    pub fn hold_logins(&self) {
        self.login_gated.store(true, Ordering::SeqCst);
    }

    /// Unblock exactly one held `login` call
    pub fn release_login(&self) {
        self.login_gate.add_permits(1);
    }

    fn serve(queue: &Queued, endpoint: &str) -> Result<AuthResponse, ApiError> {
        lock(queue)
            .pop_front()
            .unwrap_or_else(|| panic!("no {endpoint} response queued on MockAuthApiClient"))
    }
}

#[async_trait]
impl AuthApiClient for MockAuthApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        lock(&self.login_requests).push(request.clone());
        if self.login_gated.load(Ordering::SeqCst) {
            let permit = self
                .login_gate
                .acquire()
                .await
                .expect("login gate semaphore closed");
            permit.forget();
        }
        Self::serve(&self.login_responses, "login")
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        lock(&self.register_requests).push(request.clone());
        Self::serve(&self.register_responses, "register")
    }

    async fn logout(&self, access_token: &str) -> Result<AuthResponse, ApiError> {
        lock(&self.logout_tokens).push(access_token.to_string());
        Self::serve(&self.logout_responses, "logout")
    }

    async fn refresh_token(&self, request: &RefreshRequest) -> Result<AuthResponse, ApiError> {
        lock(&self.refresh_requests).push(request.clone());
        Self::serve(&self.refresh_responses, "refresh")
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthResponse, ApiError> {
        lock(&self.current_user_tokens).push(access_token.to_string());
        Self::serve(&self.current_user_responses, "current_user")
    }
}

/// [`TokenStore`] double whose every operation faults
///
/// Used to exercise the `UnknownError` wrapping paths.
#[derive(Default)]
pub struct FailingTokenStore;

impl FailingTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokenStore for FailingTokenStore {
    async fn save(&self, _token: &AuthToken) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("token store unavailable"))
    }

    async fn get(&self) -> anyhow::Result<Option<AuthToken>> {
        Err(anyhow::anyhow!("token store unavailable"))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("token store unavailable"))
    }
}
