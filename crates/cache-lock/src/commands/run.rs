use std::{process::ExitStatus, time::Duration};

use anyhow::anyhow;
use async_trait::async_trait;
use cache_lock_core::{MutexOptions, UsingLockResult};
use clap::Parser;
use tracing::info;

use super::parse_seconds;
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Run a program while holding a lock
///
/// The lock is released when the program exits, whatever its status.
#[derive(Parser)]
pub(crate) struct RunCommand {
    /// Lock name
    name: String,

    /// Maximum wait, in seconds (wait forever if omitted)
    #[arg(long, value_parser = parse_seconds)]
    timeout: Option<Duration>,

    /// Lock expiration, in seconds
    #[arg(long, value_parser = parse_seconds)]
    ttl: Option<Duration>,

    /// Skip the program instead of waiting when the lock is held
    #[arg(long)]
    skip_if_blocked: bool,

    /// Program and its arguments, after `--`
    #[arg(last = true, required = true)]
    program: Vec<String>,
}

impl RunCommand {
    fn mutex_options(&self) -> MutexOptions {
        let mut options = MutexOptions::new(&self.name).skip_if_blocked(self.skip_if_blocked);
        options.timeout = self.timeout;
        options.ttl = self.ttl;
        options
    }
}

async fn run_program(program: &[String]) -> Result<ExitStatus> {
    let (name, args) = program
        .split_first()
        .ok_or_else(|| anyhow!("No program given"))?;

    info!(program = %name, message = "Running program");
    Ok(tokio::process::Command::new(name).args(args).status().await?)
}

#[async_trait]
impl Command for RunCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let lock = ctx.lock();
        let options = self.mutex_options();

        let result = lock
            .with_mutex(&options, || run_program(&self.program))
            .await?;

        match result {
            UsingLockResult::Locked(status) if status.success() => Ok(()),
            UsingLockResult::Locked(status) => {
                Err(anyhow!("Program '{}' failed: {}", self.program[0], status))
            }
            UsingLockResult::AlreadyLocked => {
                writeln!(
                    ctx.writer.write().await,
                    "Lock '{}' is held, program skipped.",
                    self.name
                )?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cache_lock_core::LockError;
    use cache_lock_memory::MemoryCacheBackend;
    use pretty_assertions::assert_eq;

    use crate::testutils::{hold, test_command, test_command_result, CommandContextTest};

    #[tokio::test]
    async fn runs_program() {
        let ctx = CommandContextTest::new();
        let output = test_command(ctx, &["run", "deploy", "--", "true"]).await;

        assert_eq!(output, "");
    }

    #[tokio::test]
    async fn reports_failed_program() {
        let ctx = CommandContextTest::new();
        let error = test_command_result(ctx, &["run", "deploy", "--", "false"])
            .await
            .unwrap_err();

        assert!(error.to_string().starts_with("Program 'false' failed"));
    }

    #[tokio::test]
    async fn skips_when_held() {
        let backend = MemoryCacheBackend::new();
        hold(&backend, "deploy").await;

        let ctx = CommandContextTest::with_backend(backend);
        let output = test_command(
            ctx,
            &["run", "deploy", "--skip-if-blocked", "--", "true"],
        )
        .await;

        assert_eq!(output, "Lock 'deploy' is held, program skipped.\n");
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_held() {
        let backend = MemoryCacheBackend::new();
        hold(&backend, "deploy").await;

        let ctx = CommandContextTest::with_backend(backend);
        let error = test_command_result(ctx, &["run", "deploy", "--timeout", "1", "--", "true"])
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<LockError>(),
            Some(LockError::Timeout { .. })
        ));
    }
}
