use cache_lock_interface::{CacheBackend, LockError, Result};
use tracing::{debug, error, info};

use crate::LockToken;

/// Lock status.
#[derive(Debug)]
pub enum LockStatus<'a> {
    /// Already locked.
    AlreadyLocked,
    /// Lock successful.
    SuccessfullyLocked(LockInstance<'a>),
}

/// Lock instance.
///
/// Dropping an instance does not release the lock, the entry then stays
/// until its TTL expires. Call [`LockInstance::release`].
#[must_use]
pub struct LockInstance<'a> {
    backend: &'a dyn CacheBackend,
    name: String,
    key: String,
    token: LockToken,
}

impl<'a> std::fmt::Debug for LockInstance<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockInstance")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("token", &self.token)
            .finish()
    }
}

impl<'a> LockInstance<'a> {
    pub(crate) fn new(
        backend: &'a dyn CacheBackend,
        name: String,
        key: String,
        token: LockToken,
    ) -> Self {
        Self {
            backend,
            name,
            key,
            token,
        }
    }

    /// Lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cache key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ownership token.
    pub fn token(&self) -> &LockToken {
        &self.token
    }

    /// Checks that the cache still holds this instance's token.
    pub async fn is_held(&self) -> Result<bool> {
        Ok(self
            .backend
            .get(&self.key)
            .await?
            .map(|current| self.token == *current.as_str())
            .unwrap_or(false))
    }

    /// Release lock instance.
    pub async fn release(self) -> Result<()> {
        release_key(self.backend, &self.name, &self.key, &self.token).await
    }
}

/// Deletes `key` if it still holds `token`.
///
/// A missing key counts as released.
pub(crate) async fn release_key(
    backend: &dyn CacheBackend,
    name: &str,
    key: &str,
    token: &LockToken,
) -> Result<()> {
    if backend.compare_and_delete(key, token.as_str()).await? {
        info!(
            lock_name = name,
            lock_key = key,
            token = %token,
            message = "Lock release successful"
        );
        return Ok(());
    }

    match backend.get(key).await? {
        None => {
            debug!(
                lock_name = name,
                lock_key = key,
                token = %token,
                message = "Lock already expired or released"
            );
            Ok(())
        }
        Some(holder) => {
            error!(
                lock_name = name,
                lock_key = key,
                token = %token,
                holder = %holder,
                message = "Lock release failed, lock is owned by another holder"
            );
            Err(LockError::NotOwned {
                name: name.to_owned(),
                token: token.to_string(),
            })
        }
    }
}
