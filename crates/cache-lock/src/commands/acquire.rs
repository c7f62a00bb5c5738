use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;

use super::{acquire_options, parse_seconds};
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Acquire a lock and print its token
///
/// The lock stays held until released with its token or until it expires.
#[derive(Parser)]
pub(crate) struct AcquireCommand {
    /// Lock name
    name: String,

    /// Maximum wait, in seconds (wait forever if omitted)
    #[arg(long, value_parser = parse_seconds)]
    timeout: Option<Duration>,

    /// Lock expiration, in seconds
    #[arg(long, value_parser = parse_seconds)]
    ttl: Option<Duration>,
}

#[async_trait]
impl Command for AcquireCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let lock = ctx.lock();
        let instance = lock
            .acquire(&self.name, &acquire_options(self.timeout, self.ttl))
            .await?;

        writeln!(ctx.writer.write().await, "{}", instance.token())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cache_lock_core::LockError;
    use cache_lock_memory::MemoryCacheBackend;
    use pretty_assertions::assert_eq;

    use crate::testutils::{hold, test_command, test_command_result, CommandContextTest};

    #[tokio::test]
    async fn prints_token() {
        let ctx = CommandContextTest::new();
        let output = test_command(ctx, &["acquire", "deploy", "--ttl", "60"]).await;

        assert_eq!(output.trim().len(), 36);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_held() {
        let backend = MemoryCacheBackend::new();
        hold(&backend, "deploy").await;

        let ctx = CommandContextTest::with_backend(backend);
        let error = test_command_result(ctx, &["acquire", "deploy", "--timeout", "0.5"])
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<LockError>(),
            Some(LockError::Timeout { .. })
        ));
    }
}
