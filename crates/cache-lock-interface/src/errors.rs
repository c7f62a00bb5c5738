use std::time::Duration;

use thiserror::Error;

/// Lock error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum LockError {
    /// Acquisition did not succeed in time.
    #[error("Could not acquire lock '{name}' within {timeout:?}")]
    Timeout { name: String, timeout: Duration },

    /// Release attempted by a caller which does not own the lock anymore.
    #[error("Lock '{name}' is not owned by token '{token}'")]
    NotOwned { name: String, token: String },

    /// Cache backend error.
    #[error(transparent)]
    BackendError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LockError {
    /// Wraps any backend-specific error.
    pub fn backend<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::BackendError {
            source: source.into(),
        }
    }
}

/// Result alias.
pub type Result<T, E = LockError> = core::result::Result<T, E>;
