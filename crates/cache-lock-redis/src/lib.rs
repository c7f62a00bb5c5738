//! Redis cache backend

mod redis;

pub use crate::redis::RedisCacheBackend;
