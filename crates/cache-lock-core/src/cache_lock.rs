use std::time::Duration;

use cache_lock_config::LockConfig;
use cache_lock_interface::{CacheBackend, LockError, Result};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    lock_instance::release_key, AcquireOptions, LockInstance, LockStatus, LockToken,
};

/// Lower bound of the period between two acquisition attempts.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Named mutual-exclusion locks stored in a shared cache.
///
/// Each lock name maps to the cache key `<key_prefix>:<name>`. The entry holds
/// the token of the current owner and disappears on release or TTL expiry.
/// Locks are not reentrant: every acquisition uses a new token.
pub struct CacheLock<'a> {
    backend: &'a dyn CacheBackend,
    config: LockConfig,
}

impl<'a> CacheLock<'a> {
    /// Creates a lock handle over a cache backend.
    pub fn new(backend: &'a dyn CacheBackend, config: LockConfig) -> Self {
        Self { backend, config }
    }

    /// Lock configuration.
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Cache key for a lock name.
    pub fn key_for(&self, name: &str) -> String {
        format!("{}:{}", self.config.key_prefix, name)
    }

    /// Token of the current holder, if any.
    #[tracing::instrument(skip(self), ret)]
    pub async fn holder(&self, name: &str) -> Result<Option<LockToken>> {
        Ok(self
            .backend
            .get(&self.key_for(name))
            .await?
            .map(LockToken::from))
    }

    /// Checks if the lock is held by anyone.
    pub async fn is_locked(&self, name: &str) -> Result<bool> {
        Ok(self.holder(name).await?.is_some())
    }

    /// Checks if the lock is held with a specific token.
    pub async fn is_locked_by(&self, name: &str, token: &LockToken) -> Result<bool> {
        Ok(self.holder(name).await?.as_ref() == Some(token))
    }

    /// Tries to lock once, without waiting.
    #[tracing::instrument(skip(self))]
    pub async fn try_acquire(&self, name: &str, ttl: Option<Duration>) -> Result<LockStatus<'a>> {
        let key = self.key_for(name);
        let ttl = ttl.or(self.config.default_ttl);

        match self.attempt(name, &key, ttl).await? {
            Some(instance) => Ok(LockStatus::SuccessfullyLocked(instance)),
            None => {
                info!(
                    lock_name = name,
                    lock_key = %key,
                    message = "Lock acquisition skipped, already locked"
                );
                Ok(LockStatus::AlreadyLocked)
            }
        }
    }

    /// Waits for a lock, polling until it is free or the timeout elapses.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&self, name: &str, options: &AcquireOptions) -> Result<LockInstance<'a>> {
        let key = self.key_for(name);
        let ttl = options.ttl.or(self.config.default_ttl);
        let poll_interval = options
            .poll_interval
            .unwrap_or(self.config.release_check_period)
            .max(MIN_POLL_INTERVAL);
        // A deadline past the clock range never elapses
        let deadline = options
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout));

        loop {
            if let Some(instance) = self.attempt(name, &key, ttl).await? {
                return Ok(instance);
            }

            let wait = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        warn!(
                            lock_name = name,
                            lock_key = %key,
                            timeout = ?options.timeout,
                            message = "Lock acquisition timed out"
                        );
                        return Err(LockError::Timeout {
                            name: name.to_owned(),
                            timeout: options.timeout.unwrap_or_default(),
                        });
                    }

                    remaining.min(poll_interval)
                }
                None => poll_interval,
            };

            debug!(
                lock_name = name,
                lock_key = %key,
                wait = ?wait,
                message = "Waiting to acquire lock"
            );
            self.backend.sleep_for_duration(wait).await?;
        }
    }

    /// Releases a lock if `token` still owns it.
    ///
    /// Releasing an expired lock succeeds. Releasing a lock held by another
    /// token fails with [`LockError::NotOwned`] and leaves it in place.
    #[tracing::instrument(skip(self))]
    pub async fn release(&self, name: &str, token: &LockToken) -> Result<()> {
        release_key(self.backend, name, &self.key_for(name), token).await
    }

    /// Deletes a lock whoever holds it.
    #[tracing::instrument(skip(self), ret)]
    pub async fn force_release(&self, name: &str) -> Result<bool> {
        let key = self.key_for(name);
        let deleted = self.backend.delete(&key).await?;
        if deleted {
            warn!(
                lock_name = name,
                lock_key = %key,
                message = "Lock forcibly released"
            );
        }

        Ok(deleted)
    }

    async fn attempt(
        &self,
        name: &str,
        key: &str,
        ttl: Option<Duration>,
    ) -> Result<Option<LockInstance<'a>>> {
        let token = LockToken::generate();
        if !self
            .backend
            .set_if_not_exists(key, token.as_str(), ttl)
            .await?
        {
            return Ok(None);
        }

        info!(
            lock_name = name,
            lock_key = key,
            token = %token,
            ttl = ?ttl,
            message = "Lock acquisition successful"
        );
        Ok(Some(LockInstance::new(
            self.backend,
            name.to_owned(),
            key.to_owned(),
            token,
        )))
    }
}
