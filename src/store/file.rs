//! File-backed token store
//!
//! Persists the token pair as JSON at a configured path so a session
//! survives process restarts. Writes go through a sibling temp file and an
//! atomic rename; readers therefore see either the previous or the new
//! token, never a torn write.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::AuthToken;
use crate::store::TokenStore;

/// Durable token slot stored as a JSON file
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes writers; readers go straight to the file and rely on the
    // atomic rename for consistency.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &AuthToken) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating token directory {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(token).context("serializing token")?;
        let temp = self.temp_path();
        std::fs::write(&temp, json)
            .with_context(|| format!("writing token file {}", temp.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("restricting permissions on {}", temp.display()))?;
        }

        std::fs::rename(&temp, &self.path)
            .with_context(|| format!("replacing token file {}", self.path.display()))?;
        log::debug!("token saved to {}", self.path.display());
        Ok(())
    }

    async fn get(&self) -> anyhow::Result<Option<AuthToken>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading token file {}", self.path.display()))
            }
        };

        match serde_json::from_str(&contents) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // A corrupt file is treated as an absent session rather than a
                // hard fault; the user simply has to log in again.
                log::warn!(
                    "ignoring unreadable token file {}: {e}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing token file {}", self.path.display()))
            }
        }
    }
}
