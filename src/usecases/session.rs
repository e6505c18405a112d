//! Current-session lookup use case

use std::sync::Arc;

use crate::errors::{AuthError, AuthResult};
use crate::models::AuthToken;
use crate::store::TokenStore;

/// Read the stored session token, if any
///
/// Absence of a session is a normal answer (`Ok(None)`), not an error; only
/// an unexpected fault from the store surfaces as `UnknownError`.
pub struct CurrentSessionUseCase {
    store: Arc<dyn TokenStore>,
}

impl CurrentSessionUseCase {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Look up the stored token pair
    ///
    /// # Errors
    ///
    /// `UnknownError` when the store itself faults.
    pub async fn run(&self) -> AuthResult<Option<AuthToken>> {
        self.store.get().await.map_err(|e| {
            log::error!("token store read failed: {e}");
            AuthError::UnknownError
        })
    }
}
