//! Validation utilities.

use std::fmt::Write;

use cache_lock_config::{BackendDriver, Config};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        let _ = write!(error, "\n  - Missing env. var.: {}", name);
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        let _ = write!(error, "\n  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    if config.lock.key_prefix.is_empty() {
        _missing(&mut error, "CACHE_LOCK_KEY_PREFIX");
    }
    if config.lock.release_check_period.is_zero() {
        _invalid(
            &mut error,
            "CACHE_LOCK_RELEASE_CHECK_PERIOD",
            "must be greater than zero",
        );
    }

    // Check redis configuration
    if config.backend.driver == BackendDriver::Redis && config.backend.redis.address.is_empty() {
        _missing(&mut error, "CACHE_LOCK_BACKEND_REDIS_ADDRESS");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
