//! Token storage
//!
//! A single mutable slot holding the session's [`AuthToken`] pair. All
//! reads and writes are sequentially consistent per process; a write is
//! atomic with respect to readers, so a partially written token is never
//! observable. Two implementations are provided: an in-memory slot and a
//! file-backed store for sessions that survive a restart.

use async_trait::async_trait;

use crate::models::AuthToken;

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;

/// Persistent slot for the current session's token pair
///
/// Last-write-wins; no transactional guarantees beyond slot atomicity.
/// Failures are reported as plain `anyhow` errors and wrapped into the
/// flat taxonomy at the repository boundary.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Replace the stored token pair
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    async fn save(&self, token: &AuthToken) -> anyhow::Result<()>;

    /// Read the stored token pair, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read. Absence of a
    /// token is `Ok(None)`, not an error.
    async fn get(&self) -> anyhow::Result<Option<AuthToken>>;

    /// Remove the stored token pair
    ///
    /// Clearing an already-empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    async fn clear(&self) -> anyhow::Result<()>;
}
