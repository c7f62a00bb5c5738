use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show who holds a lock
#[derive(Parser)]
pub(crate) struct StatusCommand {
    /// Lock name
    name: String,
}

#[async_trait]
impl Command for StatusCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let holder = ctx.lock().holder(&self.name).await?;
        match holder {
            Some(token) => writeln!(
                ctx.writer.write().await,
                "Lock '{}' is held by token '{}'.",
                self.name,
                token
            )?,
            None => writeln!(ctx.writer.write().await, "Lock '{}' is free.", self.name)?,
        }

        Ok(())
    }
}
