use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use cache_lock_interface::{CacheBackend, LockError, Result};
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }
}

/// In-process cache backend.
///
/// Expiration follows the tokio clock, so a paused runtime controls it.
#[derive(Debug, Default)]
pub struct MemoryCacheBackend {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|e| e.values().filter(|v| !v.is_expired(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locks the map and drops expired entries.
    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| LockError::backend(e.to_string()))?;

        let now = Instant::now();
        entries.retain(|_, v| !v.is_expired(now));
        Ok(entries)
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    #[tracing::instrument(skip(self, value), ret)]
    async fn set_if_not_exists(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool> {
        let mut entries = self.entries()?;
        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                // Past the clock range means never
                expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
            },
        );
        Ok(true)
    }

    #[tracing::instrument(skip(self), ret)]
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let mut entries = self.entries()?;
        match entries.get(key) {
            Some(entry) if entry.value == expected => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).map(|e| e.value.clone()))
    }

    #[tracing::instrument(skip(self), ret)]
    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries()?.remove(key).is_some())
    }

    #[tracing::instrument(skip(self))]
    async fn sleep_for_duration(&self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        self.entries().map(|_| ())
    }
}
