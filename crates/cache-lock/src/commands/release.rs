use async_trait::async_trait;
use cache_lock_core::LockToken;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Release a lock held with a given token
#[derive(Parser)]
pub(crate) struct ReleaseCommand {
    /// Lock name
    name: String,
    /// Token printed by `acquire`
    token: LockToken,
}

#[async_trait]
impl Command for ReleaseCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        ctx.lock().release(&self.name, &self.token).await?;
        writeln!(ctx.writer.write().await, "Lock '{}' released.", self.name)?;

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
    async fn release_with_token() {
        let backend = MemoryCacheBackend::new();
        let token = hold(&backend, "deploy").await;

        let ctx = CommandContextTest::with_backend(backend);
        let output = test_command(ctx, &["release", "deploy", token.as_str()]).await;

        assert_eq!(output, "Lock 'deploy' released.\n");
    }

    #[tokio::test]
    async fn release_with_wrong_token() {
        let backend = MemoryCacheBackend::new();
        hold(&backend, "deploy").await;

        let ctx = CommandContextTest::with_backend(backend);
        let error = test_command_result(ctx, &["release", "deploy", "not-mine"])
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<LockError>(),
            Some(LockError::NotOwned { .. })
        ));
    }

    #[tokio::test]
    async fn release_free_lock() {
        let ctx = CommandContextTest::new();
        let output = test_command(ctx, &["release", "deploy", "any"]).await;

        assert_eq!(output, "Lock 'deploy' released.\n");
    }
}
