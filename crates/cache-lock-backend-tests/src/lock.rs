use std::time::Duration;

use cache_lock_config::LockConfig;
use cache_lock_core::{AcquireOptions, CacheLock, LockError, MutexOptions, UsingLockResult};
use pretty_assertions::assert_eq;

use crate::testcase::backend_test_case;

fn config(prefix: String) -> LockConfig {
    LockConfig {
        key_prefix: prefix,
        release_check_period: Duration::from_millis(20),
        default_ttl: Some(Duration::from_secs(5)),
    }
}

#[tokio::test]
async fn timeout_then_release() {
    backend_test_case("timeout_then_release", |backend, prefix| async move {
        let lock = CacheLock::new(backend.as_ref(), config(prefix));

        let a = lock.acquire("job-42", &AcquireOptions::new()).await?;

        let b = lock
            .acquire(
                "job-42",
                &AcquireOptions::new().timeout(Duration::from_millis(300)),
            )
            .await;
        assert!(matches!(b, Err(LockError::Timeout { .. })));

        a.release().await?;

        let c = lock
            .acquire("job-42", &AcquireOptions::new().timeout(Duration::ZERO))
            .await?;
        c.release().await?;

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn mismatched_release_keeps_holder() {
    backend_test_case("mismatched_release", |backend, prefix| async move {
        let lock = CacheLock::new(backend.as_ref(), config(prefix));

        let holder = lock.acquire("job", &AcquireOptions::new()).await?;
        let result = lock.release("job", &"someone-else".into()).await;

        assert!(matches!(result, Err(LockError::NotOwned { .. })));
        assert!(lock.is_locked_by("job", holder.token()).await?);

        holder.release().await?;
        assert!(!lock.is_locked("job").await?);

        // Releasing twice is harmless
        lock.release("job", &"someone-else".into()).await?;

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn lock_expires() {
    backend_test_case("lock_expires", |backend, prefix| async move {
        let lock = CacheLock::new(backend.as_ref(), config(prefix));

        // Holder never releases
        let _ = lock
            .acquire(
                "job",
                &AcquireOptions::new().ttl(Duration::from_millis(200)),
            )
            .await?;

        let next = lock
            .acquire("job", &AcquireOptions::new().timeout(Duration::from_secs(2)))
            .await?;
        next.release().await?;

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn concurrent_mutex() {
    backend_test_case("concurrent_mutex", |backend, prefix| async move {
        let lock = CacheLock::new(backend.as_ref(), config(prefix));
        let counter = std::cell::Cell::new(0);
        let options = MutexOptions::new("counter").release_check_period(Duration::from_millis(5));
        let (lock_ref, counter_ref, options_ref) = (&lock, &counter, &options);

        let results = futures::future::join_all((0..20).map(move |_| {
            lock_ref.with_mutex(options_ref, move || async move {
                let value = counter_ref.get();
                tokio::time::sleep(Duration::from_millis(1)).await;
                counter_ref.set(value + 1);
                Ok::<_, LockError>(())
            })
        }))
        .await;

        for result in results {
            assert_eq!(result?, UsingLockResult::Locked(()));
        }
        assert_eq!(counter.get(), 20);
        assert!(!lock.is_locked("counter").await?);

        Ok(())
    })
    .await;
}
