use std::sync::Arc;

use cache_lock_config::{BackendDriver, Config};
use cache_lock_interface::CacheBackend;
use cache_lock_memory::MemoryCacheBackend;
use cache_lock_redis::RedisCacheBackend;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = "Distributed lock over a shared cache", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async move {
            let backend = Self::build_backend(&config)?;
            let ctx = CommandContext {
                config,
                backend,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        })
    }

    fn build_backend(config: &Config) -> Result<Box<dyn CacheBackend>> {
        Ok(match config.backend.driver {
            BackendDriver::Redis => {
                info!(
                    address = %config.backend.redis.address,
                    message = "Using RedisCacheBackend backend driver"
                );
                Box::new(RedisCacheBackend::new(&config.backend.redis.address)?)
            }
            BackendDriver::Memory => {
                warn!("Using MemoryCacheBackend backend driver, locks are local to this process");
                Box::new(MemoryCacheBackend::new())
            }
        })
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
