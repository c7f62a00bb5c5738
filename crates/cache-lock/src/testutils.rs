use std::{io::Write, sync::Arc};

use cache_lock_config::Config;
use cache_lock_core::{AcquireOptions, CacheLock, LockToken};
use cache_lock_interface::CacheBackend;
use cache_lock_memory::MemoryCacheBackend;
use clap::Parser;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
    Result,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub backend: Box<dyn CacheBackend>,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self::with_backend(MemoryCacheBackend::new())
    }

    pub fn with_backend<B: CacheBackend + 'static>(backend: B) -> Self {
        Self {
            config: Config::default(),
            backend: Box::new(backend),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            backend: self.backend,
            writer,
        }
    }
}

/// Acquire `name` with the default configuration and keep it held.
pub(crate) async fn hold(backend: &MemoryCacheBackend, name: &str) -> LockToken {
    CacheLock::new(backend, Config::default().lock)
        .acquire(name, &AcquireOptions::new())
        .await
        .unwrap()
        .token()
        .clone()
}

pub(crate) async fn test_command_result(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> Result<String> {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["cache-lock"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = match Args::try_parse_from(command_args) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        };

        CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await?;
    }

    let vec = buf.read().await.to_vec();
    Ok(std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    test_command_result(ctx, command_args).await.unwrap()
}
