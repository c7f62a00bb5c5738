//! Distributed lock over a shared cache.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache_lock;
mod lock_instance;
mod mutex;
mod options;
mod token;
mod using_lock;

pub use cache_lock::{CacheLock, MIN_POLL_INTERVAL};
pub use cache_lock_interface::{CacheBackend, LockError, Result};
pub use lock_instance::{LockInstance, LockStatus};
pub use mutex::MutexOptions;
pub use options::AcquireOptions;
pub use token::LockToken;
pub use using_lock::UsingLockResult;
