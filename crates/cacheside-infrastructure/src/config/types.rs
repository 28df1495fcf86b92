//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_SCAN_PAGES};
use cacheside_domain::constants::{DEFAULT_CACHE_TTL_MS, DEFAULT_SCAN_BATCH_SIZE};
use cacheside_providers::constants::{
    MOKA_DEFAULT_CAPACITY, REDIS_DEFAULT_OPERATION_TIMEOUT_MS, REDIS_DEFAULT_URL,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Root application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cache backend and cache-aside behaviour
    pub cache: CacheConfig,

    /// Logging setup
    pub logging: LoggingConfig,
}

/// Cache providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheProviderKind {
    /// Distributed cache (Redis)
    #[default]
    Redis,
    /// In-memory cache (Moka)
    Moka,
    /// No caching
    Null,
}

impl CacheProviderKind {
    /// Registry name of the provider
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Moka => "moka",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for CacheProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `wrap` does when the cache backend fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Propagate the backend error to the caller
    #[default]
    FailClosed,
    /// Log the backend error and serve from the producer
    FailOpen,
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled; a disabled cache resolves to the null provider
    pub enabled: bool,

    /// Cache provider
    pub provider: CacheProviderKind,

    /// Redis URL (for Redis provider)
    pub redis_url: Option<String>,

    /// TTL applied when a write names none (milliseconds)
    pub default_ttl_ms: u64,

    /// Keys requested per scan page during namespace resets
    pub scan_batch_size: usize,

    /// Maximum scan pages for one namespace reset
    pub max_scan_pages: u64,

    /// Deadline for a single backend round trip (milliseconds)
    pub operation_timeout_ms: u64,

    /// Maximum entries (for Moka provider)
    pub max_capacity: u64,

    /// Behaviour of `wrap` on backend failure
    pub failure_mode: FailureMode,
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    /// Per-call deadline as a duration
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Provider that will actually be used
    pub fn effective_provider(&self) -> CacheProviderKind {
        if self.enabled {
            self.provider
        } else {
            CacheProviderKind::Null
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: CacheProviderKind::default(),
            redis_url: Some(REDIS_DEFAULT_URL.to_string()),
            default_ttl_ms: DEFAULT_CACHE_TTL_MS,
            scan_batch_size: DEFAULT_SCAN_BATCH_SIZE,
            max_scan_pages: DEFAULT_MAX_SCAN_PAGES,
            operation_timeout_ms: REDIS_DEFAULT_OPERATION_TIMEOUT_MS,
            max_capacity: MOKA_DEFAULT_CAPACITY,
            failure_mode: FailureMode::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
