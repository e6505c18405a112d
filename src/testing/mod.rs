//! Testing utilities for authflow
//!
//! Mock collaborators, pre-built fixtures and async helpers shared by unit
//! and integration tests. Compiled for this crate's own tests and for
//! downstream integration tests via the `testing` feature.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::client::{ApiError, AuthApiClient};
use crate::machine::{LoginState, LoginStateMachine};
use crate::models::AuthResponse;
use crate::repository::AuthRepository;
use crate::store::InMemoryTokenStore;
use crate::usecases::LoginUseCase;

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    connect_failure, demo_profile, login_rejected, login_success, refresh_success,
};
pub use mocks::{FailingTokenStore, MockAuthApiClient};

/// Common test constants
pub mod constants {
    /// Default test email address
    pub const TEST_EMAIL: &str = "demo@example.com";

    /// Default test password
    pub const TEST_PASSWORD: &str = "password123";
}

/// How long [`wait_for_state`] waits before giving up
const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Await the first state snapshot satisfying `predicate`
///
/// Starts from the snapshot currently visible to the receiver, so a
/// condition that already holds returns immediately.
///
/// # Panics
///
/// Panics if the machine stops or no matching snapshot arrives within five
/// seconds.
pub async fn wait_for_state<F>(
    states: &mut watch::Receiver<LoginState>,
    predicate: F,
) -> LoginState
where
    F: Fn(&LoginState) -> bool + Send,
{
    tokio::time::timeout(WAIT_TIMEOUT, async move {
        loop {
            let current = states.borrow_and_update().clone();
            if predicate(&current) {
                return current;
            }
            states
                .changed()
                .await
                .expect("state machine stopped while waiting for a snapshot");
        }
    })
    .await
    .expect("timed out waiting for a matching state snapshot")
}

/// Spin up a login state machine against a mock API
///
/// The mock is pre-loaded with `login_responses` (served in order) and
/// backed by an in-memory token store; it is also returned so tests can
/// inspect recorded calls.
#[must_use]
pub fn machine_against(
    login_responses: Vec<Result<AuthResponse, ApiError>>,
) -> (LoginStateMachine, Arc<MockAuthApiClient>) {
    let api = Arc::new(MockAuthApiClient::new());
    for response in login_responses {
        api.queue_login(response);
    }

    let store = Arc::new(InMemoryTokenStore::new());
    let repository = Arc::new(AuthRepository::new(
        Arc::clone(&api) as Arc<dyn AuthApiClient>,
        store,
    ));
    let login = Arc::new(LoginUseCase::new(repository));
    (LoginStateMachine::spawn(login), api)
}
