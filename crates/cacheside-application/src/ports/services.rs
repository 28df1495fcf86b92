//! Service ports consumed by the application layer

use async_trait::async_trait;
use cacheside_domain::Result;

/// Eviction operations the invalidation coordinator needs from the cache
///
/// Implemented by `cacheside_infrastructure::cache::CacheService`.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Delete every key matching `"<namespace>:*"`, returning how many were deleted
    async fn reset_namespace(&self, namespace: &str) -> Result<u64>;

    /// Delete one exact key
    async fn delete_key(&self, key: &str) -> Result<bool>;
}
