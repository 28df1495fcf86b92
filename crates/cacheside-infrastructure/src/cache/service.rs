//! Cache service
//!
//! Typed surface over the cache ports: get/set/delete/exists, namespace
//! resets and the `wrap` read-through primitive. Construct once per
//! process and share it behind an `Arc`.

use async_trait::async_trait;
use cacheside_application::ports::services::CacheInvalidator;
use cacheside_domain::constants::DEFAULT_CACHE_TTL_MS;
use cacheside_domain::error::{Error, Result};
use cacheside_domain::{CacheBackend, CacheRead, CacheStore, JsonCodec, ValueCodec, build_key};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::scanner::NamespaceScanner;
use crate::config::{CacheConfig, FailureMode};

/// Cache-aside service over one backend
#[derive(Clone)]
pub struct CacheService<C: ValueCodec = JsonCodec> {
    store: Arc<dyn CacheStore>,
    scanner: NamespaceScanner,
    codec: C,
    default_ttl: Duration,
    failure_mode: FailureMode,
}

impl CacheService<JsonCodec> {
    /// Create a JSON-encoding service with a 5 minute default TTL
    pub fn new(backend: CacheBackend) -> Self {
        Self {
            store: backend.store,
            scanner: NamespaceScanner::new(backend.scanner),
            codec: JsonCodec,
            default_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            failure_mode: FailureMode::default(),
        }
    }

    /// Create a service tuned by `config`
    pub fn from_config(backend: CacheBackend, config: &CacheConfig) -> Self {
        Self::new(backend)
            .with_default_ttl(config.default_ttl())
            .with_failure_mode(config.failure_mode)
            .with_scan_batch_size(config.scan_batch_size)
            .with_max_scan_pages(config.max_scan_pages)
    }

    /// Same as [`cacheside_domain::build_key`]
    pub fn build_key(namespace: &str, key: &str) -> String {
        build_key(namespace, key)
    }

    /// Convert a millisecond TTL from an untyped boundary; zero or negative means default
    pub fn ttl_from_millis(ttl_ms: i64) -> Option<Duration> {
        u64::try_from(ttl_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

impl<C: ValueCodec> CacheService<C> {
    /// Replace the value codec
    pub fn with_codec<D: ValueCodec>(self, codec: D) -> CacheService<D> {
        CacheService {
            store: self.store,
            scanner: self.scanner,
            codec,
            default_ttl: self.default_ttl,
            failure_mode: self.failure_mode,
        }
    }

    /// TTL applied when a write names none; zero keeps the current default
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        if !ttl.is_zero() {
            self.default_ttl = ttl;
        }
        self
    }

    /// What `wrap` does on backend failure
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Keys requested per scan page during resets
    #[must_use]
    pub fn with_scan_batch_size(mut self, batch_size: usize) -> Self {
        self.scanner = self.scanner.with_batch_size(batch_size);
        self
    }

    /// Maximum scan pages for one reset
    #[must_use]
    pub fn with_max_scan_pages(mut self, max_pages: u64) -> Self {
        self.scanner = self.scanner.with_max_pages(max_pages);
        self
    }

    /// Default TTL
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Failure mode used by `wrap`
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Backend provider name
    pub fn provider_name(&self) -> &str {
        self.store.provider_name()
    }

    /// TTL a write will be stored with
    pub fn resolve_ttl(&self, ttl: Option<Duration>) -> Duration {
        ttl.filter(|ttl| !ttl.is_zero()).unwrap_or(self.default_ttl)
    }

    /// Read and decode `key`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<CacheRead<T>> {
        match self.store.get_bytes(key).await? {
            Some(bytes) => {
                let value = self.codec.decode(&bytes)?;
                debug!(key, "cache hit");
                Ok(CacheRead::Hit(value))
            }
            None => {
                debug!(key, "cache miss");
                Ok(CacheRead::Miss)
            }
        }
    }

    /// Encode and store `value` under `key`
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let bytes = self.codec.encode(value)?;
        let ttl = self.resolve_ttl(ttl);
        self.store.set_bytes(key, &bytes, ttl).await?;
        debug!(key, ttl_ms = ttl.as_millis(), "cache set");
        Ok(())
    }

    /// Delete `key`; true if it existed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.store.delete(key).await
    }

    /// Whether `key` holds an unexpired value
    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.store.exists(key).await
    }

    /// Delete every key under `namespace`
    pub async fn reset_namespace(&self, namespace: &str) -> Result<u64> {
        self.scanner.reset(namespace).await
    }

    /// Return the cached value for `key`, or compute, store and return it
    ///
    /// The producer is not called on a hit. A producer error propagates and
    /// nothing is cached. Concurrent callers on a cold key may each run the
    /// producer; the last write wins.
    pub async fn wrap<T, F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<Duration>,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<Error>,
    {
        match self.store.get_bytes(key).await {
            Ok(Some(bytes)) => match self.codec.decode::<T>(&bytes) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(key, error = %e, "discarding undecodable cache entry"),
            },
            Ok(None) => debug!(key, "cache miss"),
            Err(e) => self.tolerate(key, "read", e)?,
        }

        let value = producer().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            self.tolerate(key, "write", e)?;
        }
        Ok(value)
    }

    fn tolerate(&self, key: &str, op: &'static str, error: Error) -> Result<()> {
        match self.failure_mode {
            FailureMode::FailClosed => Err(error),
            FailureMode::FailOpen => {
                warn!(key, op, error = %error, "cache unavailable, serving without cache");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<C: ValueCodec> CacheInvalidator for CacheService<C> {
    async fn reset_namespace(&self, namespace: &str) -> Result<u64> {
        self.scanner.reset(namespace).await
    }

    async fn delete_key(&self, key: &str) -> Result<bool> {
        self.delete(key).await
    }
}

impl<C: ValueCodec> std::fmt::Debug for CacheService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("provider", &self.store.provider_name())
            .field("codec", &self.codec.name())
            .field("default_ttl", &self.default_ttl)
            .field("failure_mode", &self.failure_mode)
            .field("scanner", &self.scanner)
            .finish()
    }
}
