//! Factory for assembling the authentication stack
//!
//! All wiring is explicit constructor injection; there is no process-wide
//! registry. The factory reads [`AuthflowSettings`], picks the token store
//! implementation, builds the HTTP client and hands back the assembled
//! stack.

use std::sync::Arc;

use crate::client::{AuthApiClient, HttpAuthApiClient};
use crate::machine::LoginStateMachine;
use crate::repository::AuthRepository;
use crate::settings::{AuthflowSettings, TokenStoreSettings};
use crate::store::{FileTokenStore, InMemoryTokenStore, TokenStore};
use crate::usecases::{CurrentSessionUseCase, LoginUseCase, LogoutUseCase, RegisterUseCase};

/// The fully wired authentication stack
///
/// Use cases share one repository (and therefore one API client and token
/// store); state machines are spawned per screen from [`AuthStack::login_machine`].
pub struct AuthStack {
    pub repository: Arc<AuthRepository>,
    pub login: Arc<LoginUseCase>,
    pub register: Arc<RegisterUseCase>,
    pub logout: Arc<LogoutUseCase>,
    pub current_session: Arc<CurrentSessionUseCase>,
}

impl AuthStack {
    /// Spawn a login state machine backed by this stack's login use case
    #[must_use]
    pub fn login_machine(&self) -> LoginStateMachine {
        LoginStateMachine::spawn(Arc::clone(&self.login))
    }
}

/// Factory for creating the authentication stack with explicit wiring
pub struct AuthStackFactory;

impl AuthStackFactory {
    /// Build the complete stack from settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (invalid
    /// base URL or client build failure).
    pub fn from_settings(settings: &AuthflowSettings) -> anyhow::Result<AuthStack> {
        log::info!(
            "assembling authentication stack against {}",
            settings.api.base_url
        );
        let api: Arc<dyn AuthApiClient> = Arc::new(HttpAuthApiClient::new(&settings.api)?);
        let store = Self::select_store(&settings.token_store);
        Ok(Self::assemble(api, store))
    }

    /// Assemble a stack from explicit collaborators
    ///
    /// Useful for tests and for embedders that bring their own client or
    /// store implementations.
    #[must_use]
    pub fn assemble(api: Arc<dyn AuthApiClient>, store: Arc<dyn TokenStore>) -> AuthStack {
        let repository = Arc::new(AuthRepository::new(api, Arc::clone(&store)));
        AuthStack {
            login: Arc::new(LoginUseCase::new(Arc::clone(&repository))),
            register: Arc::new(RegisterUseCase::new(Arc::clone(&repository))),
            logout: Arc::new(LogoutUseCase::new(Arc::clone(&repository))),
            current_session: Arc::new(CurrentSessionUseCase::new(store)),
            repository,
        }
    }

    fn select_store(settings: &TokenStoreSettings) -> Arc<dyn TokenStore> {
        match &settings.path {
            Some(path) => {
                log::info!("using file-backed token store at {}", path.display());
                Arc::new(FileTokenStore::new(path.clone()))
            }
            None => {
                log::info!("using in-memory token store");
                Arc::new(InMemoryTokenStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAuthApiClient;

    #[test]
    fn test_from_settings_builds_a_stack() {
        let settings = AuthflowSettings::default();
        let stack = AuthStackFactory::from_settings(&settings).unwrap();
        assert_eq!(Arc::strong_count(&stack.repository), 4);
    }

    #[test]
    fn test_from_settings_rejects_invalid_base_url() {
        let mut settings = AuthflowSettings::default();
        settings.api.base_url = "definitely not a url".to_string();
        assert!(AuthStackFactory::from_settings(&settings).is_err());
    }

    #[tokio::test]
    async fn test_assemble_uses_the_given_collaborators() {
        let api = Arc::new(MockAuthApiClient::new());
        let store = Arc::new(crate::store::InMemoryTokenStore::new());
        let stack = AuthStackFactory::assemble(api, store);

        // No session stored yet: the current-session use case answers None.
        let session = stack.current_session.run().await.unwrap();
        assert!(session.is_none());
    }
}
