//! # Provider Implementations
//!
//! Adapters implementing the `CacheStore` and `KeyScanner` ports.
//! Every provider registers itself in
//! `cacheside_application::ports::registry::CACHE_PROVIDERS` so that
//! configuration can select it by name.

pub mod cache;
pub mod constants;

pub use cache::{NullCacheStore, NullKeyScanner};
#[cfg(feature = "cache-moka")]
pub use cache::{MokaCacheStore, MokaKeyScanner};
#[cfg(feature = "cache-redis")]
pub use cache::{RedisCacheStore, RedisConnection, RedisKeyScanner};
