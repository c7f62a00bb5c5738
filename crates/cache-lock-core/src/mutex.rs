use std::{future::Future, time::Duration};

use cache_lock_interface::LockError;

use crate::{AcquireOptions, CacheLock, UsingLockResult};

/// Describes a guarded section, optionally scoped to an object identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutexOptions {
    /// Base lock name.
    pub lock_id: String,
    /// Object identifier appended to the lock name.
    pub identifier: Option<String>,
    /// Lock expiration.
    pub ttl: Option<Duration>,
    /// Maximum wait when blocking.
    pub timeout: Option<Duration>,
    /// Skip the section instead of waiting when the lock is busy.
    pub skip_if_blocked: bool,
    /// Period between two attempts, at least [`crate::MIN_POLL_INTERVAL`].
    pub release_check_period: Option<Duration>,
}

impl MutexOptions {
    /// Blocking mutex on `lock_id`.
    pub fn new<T: Into<String>>(lock_id: T) -> Self {
        Self {
            lock_id: lock_id.into(),
            identifier: None,
            ttl: None,
            timeout: None,
            skip_if_blocked: false,
            release_check_period: None,
        }
    }

    /// Scope the mutex to one object.
    pub fn identifier<T: ToString>(mut self, identifier: T) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    /// Set TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Skip when busy.
    pub fn skip_if_blocked(mut self, value: bool) -> Self {
        self.skip_if_blocked = value;
        self
    }

    /// Set poll period.
    pub fn release_check_period(mut self, period: Duration) -> Self {
        self.release_check_period = Some(period);
        self
    }

    /// Effective lock name.
    pub fn lock_name(&self) -> String {
        match &self.identifier {
            Some(identifier) => format!("{}:{}", self.lock_id, identifier),
            None => self.lock_id.clone(),
        }
    }

    fn acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            timeout: self.timeout,
            ttl: self.ttl,
            poll_interval: self.release_check_period,
        }
    }
}

impl<'a> CacheLock<'a> {
    /// Runs `f` under the mutex described by `options`.
    ///
    /// Returns [`UsingLockResult::AlreadyLocked`] only in skip mode.
    #[tracing::instrument(skip(self, f), fields(lock_name = %options.lock_name()))]
    pub async fn with_mutex<F, Fut, T, E>(
        &self,
        options: &MutexOptions,
        f: F,
    ) -> Result<UsingLockResult<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let name = options.lock_name();

        if options.skip_if_blocked {
            self.try_using_lock(&name, options.ttl, f).await
        } else {
            self.using_lock(&name, &options.acquire_options(), f)
                .await
                .map(UsingLockResult::Locked)
        }
    }
}
