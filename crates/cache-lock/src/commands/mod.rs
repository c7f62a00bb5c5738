//! Commands.

use std::{io::Write, sync::Arc, time::Duration};

use async_trait::async_trait;
use cache_lock_config::Config;
use cache_lock_core::{AcquireOptions, CacheLock};
use cache_lock_interface::CacheBackend;
use clap::Subcommand;
use tokio::sync::RwLock;

use self::{
    acquire::AcquireCommand, force_release::ForceReleaseCommand,
    health_check::HealthCheckCommand, release::ReleaseCommand, run::RunCommand,
    status::StatusCommand,
};
use crate::Result;

mod acquire;
mod force_release;
mod health_check;
mod release;
mod run;
mod status;

pub(crate) struct CommandContext {
    pub config: Config,
    pub backend: Box<dyn CacheBackend>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn lock(&self) -> CacheLock<'_> {
        CacheLock::new(self.backend.as_ref(), self.config.lock.clone())
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Acquire(AcquireCommand),
    Release(ReleaseCommand),
    Status(StatusCommand),
    ForceRelease(ForceReleaseCommand),
    Run(RunCommand),
    HealthCheck(HealthCheckCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Acquire(sub) => sub.execute(ctx).await,
            Self::Release(sub) => sub.execute(ctx).await,
            Self::Status(sub) => sub.execute(ctx).await,
            Self::ForceRelease(sub) => sub.execute(ctx).await,
            Self::Run(sub) => sub.execute(ctx).await,
            Self::HealthCheck(sub) => sub.execute(ctx).await,
        }
    }
}

/// Parse a (fractional) number of seconds.
pub(crate) fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

pub(crate) fn acquire_options(timeout: Option<Duration>, ttl: Option<Duration>) -> AcquireOptions {
    AcquireOptions {
        timeout,
        ttl,
        poll_interval: None,
    }
}
