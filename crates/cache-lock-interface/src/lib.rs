//! Cache lock interface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;

pub use errors::{LockError, Result};
pub use interface::CacheBackend;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockCacheBackend;
