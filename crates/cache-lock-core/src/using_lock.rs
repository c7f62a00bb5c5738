use std::{future::Future, panic::AssertUnwindSafe, time::Duration};

use cache_lock_interface::LockError;
use futures::FutureExt;
use tracing::error;

use crate::{AcquireOptions, CacheLock, LockInstance, LockStatus};

/// Result of a scoped run which may be skipped.
#[derive(Debug, PartialEq, Eq)]
pub enum UsingLockResult<T> {
    /// Lock was busy, nothing ran.
    AlreadyLocked,
    /// Lock was acquired and the block ran.
    Locked(T),
}

impl<'a> CacheLock<'a> {
    /// Runs `f` while holding the lock, waiting for it per `options`.
    ///
    /// The lock is released on every exit path of `f`, including panics which
    /// are resumed afterwards. An error from `f` wins over a release error.
    pub async fn using_lock<F, Fut, T, E>(
        &self,
        name: &str,
        options: &AcquireOptions,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let instance = self.acquire(name, options).await?;
        run_then_release(instance, f).await
    }

    /// Runs `f` while holding the lock, or skips it if the lock is busy.
    pub async fn try_using_lock<F, Fut, T, E>(
        &self,
        name: &str,
        ttl: Option<Duration>,
        f: F,
    ) -> Result<UsingLockResult<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        match self.try_acquire(name, ttl).await? {
            LockStatus::AlreadyLocked => Ok(UsingLockResult::AlreadyLocked),
            LockStatus::SuccessfullyLocked(instance) => {
                run_then_release(instance, f).await.map(UsingLockResult::Locked)
            }
        }
    }
}

async fn run_then_release<F, Fut, T, E>(instance: LockInstance<'_>, f: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<LockError>,
{
    let name = instance.name().to_owned();
    let outcome = AssertUnwindSafe(async move { f().await })
        .catch_unwind()
        .await;
    let released = instance.release().await;

    match outcome {
        Ok(Ok(value)) => {
            released?;
            Ok(value)
        }
        Ok(Err(e)) => {
            if let Err(release_error) = released {
                error!(
                    lock_name = %name,
                    error = %release_error,
                    message = "Could not release lock after failed block"
                );
            }
            Err(e)
        }
        Err(panic) => {
            if let Err(release_error) = released {
                error!(
                    lock_name = %name,
                    error = %release_error,
                    message = "Could not release lock after panicked block"
                );
            }
            std::panic::resume_unwind(panic)
        }
    }
}
