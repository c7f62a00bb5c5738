//! Cache backend interface.

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Shared key-value cache able to back a lock.
///
/// Implementations must perform [`CacheBackend::set_if_not_exists`] and
/// [`CacheBackend::compare_and_delete`] atomically on the server side.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Stores `value` at `key` only if `key` is absent. Returns `true` when stored.
    async fn set_if_not_exists(&self, key: &str, value: &str, ttl: Option<Duration>)
        -> Result<bool>;
    /// Deletes `key` only if it currently holds `expected`. Returns `true` when deleted.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool>;
    /// Gets the value stored at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Deletes `key` unconditionally. Returns `true` if something was deleted.
    async fn delete(&self, key: &str) -> Result<bool>;
    /// Sleep for duration.
    async fn sleep_for_duration(&self, duration: Duration) -> Result<()>;
    /// Health check
    async fn health_check(&self) -> Result<()>;
}
