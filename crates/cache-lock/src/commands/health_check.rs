use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Check that the cache backend answers
#[derive(Parser)]
pub(crate) struct HealthCheckCommand;

#[async_trait]
impl Command for HealthCheckCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        ctx.backend.health_check().await?;
        writeln!(
            ctx.writer.write().await,
            "Backend '{}' is healthy.",
            ctx.config.backend.driver
        )?;

        Ok(())
    }
}
