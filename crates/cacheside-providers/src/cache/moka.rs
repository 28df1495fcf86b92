//! Moka in-memory cache provider
//!
//! Concurrent in-memory cache for single-instance deployments and tests.
//!
//! ## Features
//!
//! - Per-entry TTL through a moka [`Expiry`] policy
//! - Capacity-bounded with automatic eviction
//! - A [`MokaKeyScanner`] over the same entries for namespace resets
//!
//! ## Example
//!
//! ```ignore
//! use cacheside_providers::cache::MokaCacheStore;
//!
//! let store = MokaCacheStore::with_capacity(10_000);
//! let backend = store.backend(); // store + scanner sharing the entries
//! ```

use crate::constants::{MOKA_CURSOR_PREFIX, MOKA_DEFAULT_CAPACITY};
use async_trait::async_trait;
use cacheside_domain::error::{Error, Result};
use cacheside_domain::{CacheBackend, CacheStore, KeyScanner, ScanCursor, ScanPage};
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredValue {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-memory cache store
#[derive(Clone)]
pub struct MokaCacheStore {
    cache: Cache<String, StoredValue>,
    max_capacity: u64,
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheStore {
    /// Create a new Moka cache store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_CAPACITY)
    }

    /// Create a new Moka cache store holding at most `max_capacity` entries
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            max_capacity,
        }
    }

    /// Scanner over the same entries
    pub fn scanner(&self) -> MokaKeyScanner {
        MokaKeyScanner {
            cache: self.cache.clone(),
        }
    }

    /// Store/scanner pair sharing this cache
    pub fn backend(&self) -> CacheBackend {
        CacheBackend::new(Arc::new(self.clone()), Arc::new(self.scanner()))
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await.map(|value| value.bytes.to_vec()))
    }

    async fn set_bytes(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.cache
            .insert(
                key.to_string(),
                StoredValue {
                    bytes: Arc::from(value),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheStore")
            .field("max_capacity", &self.max_capacity)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

/// Key scanner over a [`MokaCacheStore`]
///
/// Walks the keys under the requested prefix in lexicographic order. The
/// cursor records the last key returned, so deleting keys between pages
/// never makes the walk skip the survivors.
///
/// Every page visits each live entry once and selects the next `count`
/// matches without sorting the rest, so a full reset costs about
/// `entries * matches / count` comparisons. Raise the scan batch size
/// along with `max_capacity` for large namespaces.
#[derive(Clone)]
pub struct MokaKeyScanner {
    cache: Cache<String, StoredValue>,
}

impl MokaKeyScanner {
    fn resume_after(cursor: &ScanCursor) -> Result<Option<&str>> {
        if cursor.is_start() {
            return Ok(None);
        }
        cursor
            .as_str()
            .strip_prefix(MOKA_CURSOR_PREFIX)
            .map(Some)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Scan cursor '{cursor}' was not issued by the moka scanner"
                ))
            })
    }
}

#[async_trait]
impl KeyScanner for MokaKeyScanner {
    async fn scan_prefix(
        &self,
        cursor: &ScanCursor,
        prefix: &str,
        count: usize,
    ) -> Result<ScanPage> {
        let after = Self::resume_after(cursor)?;
        let count = count.max(1);

        let mut window: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| {
                key.starts_with(prefix) && after.is_none_or(|last| key.as_str() > last)
            })
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        let next = if window.len() > count {
            window.select_nth_unstable(count - 1);
            window.truncate(count);
            window.sort_unstable();
            ScanCursor::new(format!("{MOKA_CURSOR_PREFIX}{}", window[count - 1]))
        } else {
            window.sort_unstable();
            ScanCursor::START
        };

        Ok(ScanPage::new(next, window))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        let mut removed = 0;
        for key in keys {
            if self.cache.remove(key.as_str()).await.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaKeyScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaKeyScanner")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cacheside_application::ports::registry::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry,
};

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MOKA_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "moka",
    description: "Moka in-memory cache with per-entry TTL",
    factory: |config: &CacheProviderConfig| {
        let store = config
            .max_capacity
            .map_or_else(MokaCacheStore::new, MokaCacheStore::with_capacity);
        Ok(store.backend())
    },
};
