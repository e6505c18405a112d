//! Login use case

use std::sync::Arc;

use crate::errors::AuthResult;
use crate::models::{Credentials, UserProfile};
use crate::repository::AuthRepository;
use crate::usecases::normalize_email;
use crate::validation::{validate_email, validate_password};

/// Validate credentials and delegate to the repository
pub struct LoginUseCase {
    repository: Arc<AuthRepository>,
}

impl LoginUseCase {
    #[must_use]
    pub fn new(repository: Arc<AuthRepository>) -> Self {
        Self { repository }
    }

    /// Run the login flow for an email/password pair
    ///
    /// The first validation failure is returned without touching the
    /// network; otherwise the email is normalized and the repository does
    /// the rest.
    ///
    /// # Errors
    ///
    /// Validation kinds for rejected input, otherwise whatever the
    /// repository classifies the network outcome as.
    pub async fn run(&self, email: &str, password: &str) -> AuthResult<UserProfile> {
        if let Some(error) = validate_email(email) {
            return Err(error);
        }
        if let Some(error) = validate_password(password) {
            return Err(error);
        }

        let credentials = Credentials::new(normalize_email(email), password);
        self.repository.login(&credentials).await
    }
}
