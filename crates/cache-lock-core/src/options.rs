use std::time::Duration;

/// Blocking acquisition options.
///
/// Unset values fall back to the lock configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquireOptions {
    /// Maximum wait, `None` waits until the lock is free.
    pub timeout: Option<Duration>,
    /// Lock expiration.
    pub ttl: Option<Duration>,
    /// Period between two attempts, at least [`crate::MIN_POLL_INTERVAL`].
    pub poll_interval: Option<Duration>,
}

impl AcquireOptions {
    /// Wait forever, with configured defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set poll interval.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = Some(poll_interval);
        self
    }
}
