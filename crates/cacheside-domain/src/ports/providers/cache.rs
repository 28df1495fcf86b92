//! Cache Provider Ports
//!
//! The generic key-value abstraction cannot delete by pattern, so the cache
//! is reached through two cooperating ports pointed at the same physical
//! store:
//!
//! - [`CacheStore`]: get/set/delete/exists with per-entry TTL
//! - [`KeyScanner`]: cursor-driven key enumeration plus batched deletion
//!
//! ## Example
//!
//! ```ignore
//! use cacheside_domain::ports::providers::cache::CacheStore;
//! use std::time::Duration;
//!
//! store.set_bytes("task:42", br#"{"id":"42"}"#, Duration::from_secs(60)).await?;
//! if let Some(bytes) = store.get_bytes("task:42").await? {
//!     // decode with the deployment codec
//! }
//! ```

use crate::error::Result;
use crate::value_objects::{ScanCursor, ScanPage};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Generic key-value cache port
///
/// Every call is a round trip to the backend; implementations must not
/// buffer or memoize. A connectivity failure is reported as
/// [`crate::Error::BackendUnavailable`], never as an absent value.
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Get the payload stored under `key`
    ///
    /// # Returns
    /// `None` if the key is absent or its TTL elapsed
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key` for `ttl`, overwriting any previous value
    async fn set_bytes(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Delete `key`
    ///
    /// # Returns
    /// True if the key was deleted, false if it didn't exist
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check if a key exists and hasn't expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Enumeration-capable cache port
///
/// Mirrors a cursor-based `SCAN`: each call examines roughly `count`
/// entries starting at `cursor` and returns the keys among them that start
/// with `prefix`. Pages may be empty while the cursor is still running;
/// the enumeration is finished only when the returned cursor is
/// [`ScanCursor::START`].
#[async_trait]
pub trait KeyScanner: Send + Sync + std::fmt::Debug {
    /// Fetch one page of keys starting with `prefix`
    async fn scan_prefix(&self, cursor: &ScanCursor, prefix: &str, count: usize)
    -> Result<ScanPage>;

    /// Delete all `keys` in a single request
    ///
    /// # Returns
    /// Number of keys the backend actually removed
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// The pair of handles a cache deployment is made of
#[derive(Debug, Clone)]
pub struct CacheBackend {
    /// Generic get/set/delete path
    pub store: Arc<dyn CacheStore>,
    /// Enumeration path used for namespace resets
    pub scanner: Arc<dyn KeyScanner>,
}

impl CacheBackend {
    /// Pair a store with a scanner over the same physical cache
    pub fn new(store: Arc<dyn CacheStore>, scanner: Arc<dyn KeyScanner>) -> Self {
        Self { store, scanner }
    }

    /// Provider name of the store half
    pub fn provider_name(&self) -> &str {
        self.store.provider_name()
    }
}
