use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Delete a lock whoever holds it
#[derive(Parser)]
pub(crate) struct ForceReleaseCommand {
    /// Lock name
    name: String,
}

#[async_trait]
impl Command for ForceReleaseCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        if ctx.lock().force_release(&self.name).await? {
            writeln!(
                ctx.writer.write().await,
                "Lock '{}' forcibly released.",
                self.name
            )?;
        } else {
            writeln!(ctx.writer.write().await, "Lock '{}' was not held.", self.name)?;
        }

        Ok(())
    }
}
