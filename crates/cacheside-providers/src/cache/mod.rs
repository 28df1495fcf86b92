//! Cache Provider Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheStore`] | Disabled | Stores nothing, scans nothing |
//! | [`MokaCacheStore`] | Local | In-memory cache with per-entry TTL |
//! | [`RedisCacheStore`] | Distributed | Redis-backed for multi-instance deployments |
//!
//! Each store comes with a matching key scanner pointed at the same data.

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use moka::{MokaCacheStore, MokaKeyScanner};
pub use null::{NullCacheStore, NullKeyScanner};
#[cfg(feature = "cache-redis")]
pub use redis::{RedisCacheStore, RedisConnection, RedisKeyScanner};
