use std::time::Duration;

use async_trait::async_trait;
use cache_lock_interface::{CacheBackend, LockError, Result};
use redis::{aio::MultiplexedConnection, Client, Cmd, Script, Value};

/// Deletes KEYS[1] only when it holds ARGV[1].
const COMPARE_AND_DELETE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// `PX` argument for a TTL.
///
/// Redis rejects zero and anything above `i64::MAX`, so the value is clamped
/// to that range.
fn expire_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX).max(1)
}

/// Redis cache backend.
#[derive(Clone)]
pub struct RedisCacheBackend {
    client: Client,
    compare_and_delete_script: Script,
}

impl RedisCacheBackend {
    /// Creates a new redis adapter.
    pub fn new(addr: &str) -> Result<Self> {
        let client = Client::open(addr).map_err(LockError::backend)?;

        Ok(Self {
            client,
            compare_and_delete_script: Script::new(COMPARE_AND_DELETE_SCRIPT),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(LockError::backend)
    }

    async fn execute_command(&self, cmd: &Cmd) -> Result<Value> {
        let mut conn = self.connection().await?;

        cmd.query_async(&mut conn).await.map_err(LockError::backend)
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    #[tracing::instrument(skip(self, value), ret)]
    async fn set_if_not_exists(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX");
        if let Some(ttl) = ttl {
            cmd.arg("PX").arg(expire_millis(ttl));
        }

        match self.execute_command(&cmd).await? {
            Value::Okay => Ok(true),
            Value::Nil => Ok(false),
            other => Err(LockError::backend(format!(
                "Unsupported response: {other:?}"
            ))),
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = self
            .compare_and_delete_script
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(LockError::backend)?;

        Ok(deleted > 0)
    }

    #[tracing::instrument(skip(self), ret)]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.execute_command(redis::cmd("GET").arg(key)).await? {
            Value::Nil => Ok(None),
            Value::Data(d) => Ok(Some(String::from_utf8_lossy(&d).into_owned())),
            other => Err(LockError::backend(format!(
                "Unsupported response: {other:?}"
            ))),
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn delete(&self, key: &str) -> Result<bool> {
        match self.execute_command(redis::cmd("DEL").arg(key)).await? {
            Value::Int(count) => Ok(count > 0),
            other => Err(LockError::backend(format!(
                "Unsupported response: {other:?}"
            ))),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn sleep_for_duration(&self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        self.execute_command(&redis::cmd("PING")).await?;
        Ok(())
    }
}
