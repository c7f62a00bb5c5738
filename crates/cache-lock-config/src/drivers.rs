use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Cache backend driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendDriver {
    /// In-process map, local to one process.
    Memory,
    /// Redis server.
    Redis,
}

impl FromStr for BackendDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(ConfigError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

impl fmt::Display for BackendDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Redis => f.write_str("redis"),
        }
    }
}
