//! Null cache provider
//!
//! A backend that stores nothing. Every read is a miss, so `wrap` always
//! runs its producer. Used when caching is disabled in configuration.

use async_trait::async_trait;
use cacheside_domain::error::Result;
use cacheside_domain::{CacheBackend, CacheStore, KeyScanner, ScanCursor, ScanPage};
use std::sync::Arc;
use std::time::Duration;

/// Null cache store that doesn't store anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

impl NullCacheStore {
    /// Create a new null cache store
    pub fn new() -> Self {
        Self
    }

    /// Store/scanner pair for a disabled cache
    pub fn backend() -> CacheBackend {
        CacheBackend::new(Arc::new(Self), Arc::new(NullKeyScanner))
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_bytes(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

/// Null key scanner: every scan finishes immediately with no keys
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKeyScanner;

#[async_trait]
impl KeyScanner for NullKeyScanner {
    async fn scan_prefix(
        &self,
        _cursor: &ScanCursor,
        _prefix: &str,
        _count: usize,
    ) -> Result<ScanPage> {
        Ok(ScanPage::new(ScanCursor::START, Vec::new()))
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<u64> {
        Ok(0)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cacheside_application::ports::registry::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry,
};

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static NULL_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "null",
    description: "No-op cache (caching disabled)",
    factory: |_config: &CacheProviderConfig| Ok(NullCacheStore::backend()),
};
