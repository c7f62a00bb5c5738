use cache_lock_interface::CacheBackend;
use cache_lock_memory::MemoryCacheBackend;
use cache_lock_redis::RedisCacheBackend;
use futures::Future;
use tracing::{info, warn};
use uuid::Uuid;

/// Redis server used by backend tests, skipped when unset.
pub const REDIS_ADDRESS_VAR: &str = "CACHE_LOCK_TEST_REDIS_ADDRESS";

pub type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Runs `block` against every available backend.
///
/// The block receives the backend and a key prefix unique to this run.
pub async fn backend_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn CacheBackend>, String) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let prefix = format!("test-cache-lock-{test_name}-{}", Uuid::new_v4());

    {
        // In memory
        let backend = Box::new(MemoryCacheBackend::new());
        info!("running memory test {test_name} ...");
        block(backend, prefix.clone()).await.unwrap();
    }

    match std::env::var(REDIS_ADDRESS_VAR) {
        Ok(address) if !address.is_empty() => {
            let backend = Box::new(RedisCacheBackend::new(&address).unwrap());
            info!("running redis test {test_name} ...");
            block(backend, prefix).await.unwrap();
        }
        _ => {
            warn!("{REDIS_ADDRESS_VAR} is not set, skipping redis test {test_name}");
        }
    }
}
