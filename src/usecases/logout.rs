//! Logout use case

use std::sync::Arc;

use crate::errors::AuthResult;
use crate::repository::AuthRepository;

/// End the current session
pub struct LogoutUseCase {
    repository: Arc<AuthRepository>,
}

impl LogoutUseCase {
    #[must_use]
    pub fn new(repository: Arc<AuthRepository>) -> Self {
        Self { repository }
    }

    /// Run the logout flow
    ///
    /// Always succeeds once the local session is cleared, even when the
    /// remote call fails.
    ///
    /// # Errors
    ///
    /// None in practice; the signature keeps the boundary uniform.
    pub async fn run(&self) -> AuthResult<()> {
        self.repository.logout().await
    }
}
