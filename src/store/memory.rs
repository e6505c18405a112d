//! In-memory token store

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::AuthToken;
use crate::store::TokenStore;

/// Process-local token slot backed by an `RwLock`
///
/// The default store: tokens live exactly as long as the process. The lock
/// guarantees readers never observe a half-written pair.
#[derive(Default)]
pub struct InMemoryTokenStore {
    slot: RwLock<Option<AuthToken>>,
}

impl InMemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn save(&self, token: &AuthToken) -> anyhow::Result<()> {
        *self.slot.write().await = Some(token.clone());
        Ok(())
    }

    async fn get(&self) -> anyhow::Result<Option<AuthToken>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
