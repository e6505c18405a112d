//! Registration use case

use std::sync::Arc;

use crate::errors::AuthResult;
use crate::models::{RegisterRequest, UserProfile};
use crate::repository::AuthRepository;
use crate::usecases::normalize_email;
use crate::validation::validate_registration;

/// Validate a registration form and delegate to the repository
pub struct RegisterUseCase {
    repository: Arc<AuthRepository>,
}

impl RegisterUseCase {
    #[must_use]
    pub fn new(repository: Arc<AuthRepository>) -> Self {
        Self { repository }
    }

    /// Run the registration flow
    ///
    /// Validation short-circuits on the first failure (name, email,
    /// password, confirmation, strength — in that order) without touching
    /// the network. Clean input is normalized (name trimmed, email trimmed
    /// and lowercased) before it is sent.
    ///
    /// # Errors
    ///
    /// Validation kinds for rejected input, otherwise whatever the
    /// repository classifies the network outcome as.
    pub async fn run(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AuthResult<UserProfile> {
        if let Some(error) = validate_registration(name, email, password, confirm_password) {
            return Err(error);
        }

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        self.repository.register(&request).await
    }
}
