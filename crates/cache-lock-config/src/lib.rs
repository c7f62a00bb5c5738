//! Config module.

#![warn(missing_docs)]

mod drivers;
mod errors;

use std::{env, str::FromStr, time::Duration};

pub use drivers::BackendDriver;
pub use errors::ConfigError;

/// Default key prefix.
pub const DEFAULT_KEY_PREFIX: &str = "cache-lock";

/// Lock configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LockConfig {
    /// Prefix prepended to every lock name.
    pub key_prefix: String,
    /// Poll period between two acquisition attempts.
    pub release_check_period: Duration,
    /// Default lock expiration, `None` to never expire.
    pub default_ttl: Option<Duration>,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.into(),
            release_check_period: Duration::from_millis(100),
            default_ttl: Some(Duration::from_secs(30)),
        }
    }
}

/// Cache backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Backend driver.
    pub driver: BackendDriver,
    /// Redis options.
    pub redis: BackendRedisConfig,
}

/// Redis backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRedisConfig {
    /// Redis address.
    pub address: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Lock options.
    pub lock: LockConfig,
    /// Cache backend options.
    pub backend: BackendConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, ConfigError> {
        Self::from_vars(version, |name| env::var(name).ok())
    }

    /// Create configuration using a variable lookup function.
    pub fn from_vars<F>(version: String, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Config {
            lock: LockConfig {
                key_prefix: vars.to_str("CACHE_LOCK_KEY_PREFIX", DEFAULT_KEY_PREFIX),
                release_check_period: vars
                    .to_duration("CACHE_LOCK_RELEASE_CHECK_PERIOD", 0.1)?,
                default_ttl: vars.to_optional_duration("CACHE_LOCK_DEFAULT_TTL", 30.0)?,
            },
            backend: BackendConfig {
                driver: BackendDriver::from_str(
                    &vars.to_str("CACHE_LOCK_BACKEND_DRIVER", "redis"),
                )?,
                redis: BackendRedisConfig {
                    address: vars
                        .to_str("CACHE_LOCK_BACKEND_REDIS_ADDRESS", "redis://localhost"),
                },
            },
            logging: LoggingConfig {
                use_bunyan: vars.to_bool("CACHE_LOCK_LOGGING_USE_BUNYAN", false),
            },
            version,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock: LockConfig::default(),
            backend: BackendConfig {
                driver: BackendDriver::Redis,
                redis: BackendRedisConfig {
                    address: "redis://localhost".into(),
                },
            },
            logging: LoggingConfig { use_bunyan: false },
            version: "0.0.0".into(),
        }
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn to_str(&self, name: &str, default: &str) -> String {
        (self.0)(name).unwrap_or_else(|| default.to_string())
    }

    fn to_bool(&self, name: &str, default: bool) -> bool {
        (self.0)(name).map(|e| !e.is_empty()).unwrap_or(default)
    }

    fn to_secs(&self, name: &str, default: f64) -> Result<f64, ConfigError> {
        match (self.0)(name) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: name.into(),
                value,
                reason: "expected a number of seconds".into(),
            }),
        }
    }

    fn to_duration(&self, name: &str, default: f64) -> Result<Duration, ConfigError> {
        let secs = self.to_secs(name, default)?;
        Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidValue {
            name: name.into(),
            value: secs.to_string(),
            reason: e.to_string(),
        })
    }

    /// Zero means no duration.
    fn to_optional_duration(
        &self,
        name: &str,
        default: f64,
    ) -> Result<Option<Duration>, ConfigError> {
        let duration = self.to_duration(name, default)?;
        Ok(if duration.is_zero() {
            None
        } else {
            Some(duration)
        })
    }
}
