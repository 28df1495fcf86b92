//! Redis distributed cache provider
//!
//! Distributed cache implementation using Redis as the backend.
//! Suitable for multi-instance deployments.
//!
//! ## Features
//!
//! - Millisecond TTLs via `SET ... PX`
//! - Namespace resets through cursor-driven `SCAN ... MATCH` and batched `DEL`
//! - Lazily established, auto-reconnecting [`ConnectionManager`]
//! - A deadline on every round trip
//!
//! ## Example
//!
//! ```ignore
//! use cacheside_providers::cache::{RedisCacheStore, RedisConnection, RedisKeyScanner};
//! use std::time::Duration;
//!
//! let timeout = Duration::from_secs(2);
//! let store = RedisCacheStore::new(RedisConnection::open("redis://localhost:6379", timeout)?);
//! // The scanner gets its own connection so long scans never queue behind reads
//! let scanner = RedisKeyScanner::new(RedisConnection::open("redis://localhost:6379", timeout)?);
//! ```

use crate::constants::{REDIS_DEFAULT_OPERATION_TIMEOUT_MS, REDIS_DEFAULT_URL};
use async_trait::async_trait;
use cacheside_domain::error::{Error, Result};
use cacheside_domain::{CacheBackend, CacheStore, KeyScanner, ScanCursor, ScanPage};
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;

/// Handle to one Redis connection
///
/// Nothing is dialed until the first command. Clones share the connection.
#[derive(Clone)]
pub struct RedisConnection {
    client: Client,
    manager: Arc<OnceCell<ConnectionManager>>,
    timeout: Duration,
}

impl RedisConnection {
    /// Parse `url` and prepare a connection with the given per-call deadline
    pub fn open(url: &str, operation_timeout: Duration) -> Result<Self> {
        let client = Client::open(url).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{url}'"), e)
        })?;

        Ok(Self {
            client,
            manager: Arc::new(OnceCell::new()),
            timeout: operation_timeout,
        })
    }

    async fn manager(&self) -> Result<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                match timeout(self.timeout, ConnectionManager::new(self.client.clone())).await {
                    Ok(Ok(manager)) => {
                        tracing::debug!("redis connection established");
                        Ok(manager)
                    }
                    Ok(Err(e)) => Err(Error::backend_unavailable_with_source(
                        format!("Failed to connect to Redis: {e}"),
                        e,
                    )),
                    Err(elapsed) => Err(Error::backend_unavailable_with_source(
                        format!("Timed out connecting to Redis after {:?}", self.timeout),
                        elapsed,
                    )),
                }
            })
            .await?;
        Ok(manager.clone())
    }

    /// Run `cmd` under the deadline; every failure is `BackendUnavailable`
    async fn query<T: FromRedisValue>(&self, cmd: &Cmd, op: &'static str) -> Result<T> {
        let mut conn = self.manager().await?;
        match timeout(self.timeout, cmd.query_async::<T>(&mut conn)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(op, error = %e, "redis command failed");
                Err(Error::backend_unavailable_with_source(
                    format!("Redis {op} failed: {e}"),
                    e,
                ))
            }
            Err(elapsed) => {
                tracing::warn!(op, timeout = ?self.timeout, "redis command timed out");
                Err(Error::backend_unavailable_with_source(
                    format!("Redis {op} timed out after {:?}", self.timeout),
                    elapsed,
                ))
            }
        }
    }
}

impl std::fmt::Debug for RedisConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConnection")
            .field("timeout", &self.timeout)
            .field("connected", &self.manager.initialized())
            .finish_non_exhaustive()
    }
}

/// Redis cache store
#[derive(Debug, Clone)]
pub struct RedisCacheStore {
    conn: RedisConnection,
}

impl RedisCacheStore {
    /// Create a store over `conn`
    pub fn new(conn: RedisConnection) -> Self {
        Self { conn }
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.conn.query(&cmd, "GET").await
    }

    async fn set_bytes(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("PX").arg(ttl_millis(ttl));
        self.conn.query::<()>(&cmd, "SET").await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let removed: i64 = self.conn.query(&cmd, "DEL").await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(key);
        let found: i64 = self.conn.query(&cmd, "EXISTS").await?;
        Ok(found > 0)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

/// Redis key scanner
#[derive(Debug, Clone)]
pub struct RedisKeyScanner {
    conn: RedisConnection,
}

impl RedisKeyScanner {
    /// Create a scanner over `conn`
    pub fn new(conn: RedisConnection) -> Self {
        Self { conn }
    }
}

/// Escape glob metacharacters so a prefix matches literally in `MATCH`
pub fn escape_glob(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl KeyScanner for RedisKeyScanner {
    async fn scan_prefix(
        &self,
        cursor: &ScanCursor,
        prefix: &str,
        count: usize,
    ) -> Result<ScanPage> {
        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor.as_str())
            .arg("MATCH")
            .arg(format!("{}*", escape_glob(prefix)))
            .arg("COUNT")
            .arg(count.max(1));

        let (next, keys): (String, Vec<String>) = self.conn.query(&cmd, "SCAN").await?;
        Ok(ScanPage::new(ScanCursor::new(next), keys))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        for key in keys {
            cmd.arg(key);
        }
        let removed: u64 = self.conn.query(&cmd, "DEL").await?;
        Ok(removed)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cacheside_application::ports::registry::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry,
};

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static REDIS_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "redis",
    description: "Redis distributed cache with SCAN-based namespace resets",
    factory: |config: &CacheProviderConfig| {
        let url = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URL);
        let deadline = config
            .operation_timeout
            .unwrap_or(Duration::from_millis(REDIS_DEFAULT_OPERATION_TIMEOUT_MS));

        let store = RedisConnection::open(url, deadline).map_err(|e| e.to_string())?;
        let scanner = RedisConnection::open(url, deadline).map_err(|e| e.to_string())?;
        Ok(CacheBackend::new(
            Arc::new(RedisCacheStore::new(store)),
            Arc::new(RedisKeyScanner::new(scanner)),
        ))
    },
};
