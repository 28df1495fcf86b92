//! Cache Provider Registry
//!
//! Auto-registration system for cache backends. Each provider submits a
//! [`CacheProviderEntry`] to [`CACHE_PROVIDERS`] with
//! `#[linkme::distributed_slice]`; configuration then picks one by name.

use std::time::Duration;

use cacheside_domain::CacheBackend;

/// Configuration for cache backend creation
///
/// Contains all configuration options that a cache provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct CacheProviderConfig {
    /// Provider name (e.g., "redis", "moka", "null")
    pub provider: String,
    /// Connection URI (for distributed caches)
    pub uri: Option<String>,
    /// Maximum number of entries (for in-memory caches)
    pub max_capacity: Option<u64>,
    /// Deadline applied to every remote call
    pub operation_timeout: Option<Duration>,
}

impl CacheProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the maximum capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Set the per-operation deadline
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }
}

/// Registry entry for cache providers
pub struct CacheProviderEntry {
    /// Unique provider name (e.g., "redis", "moka", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the store/scanner pair
    pub factory: fn(&CacheProviderConfig) -> Result<CacheBackend, String>,
}

/// Cache providers registered at link time
#[linkme::distributed_slice]
pub static CACHE_PROVIDERS: [CacheProviderEntry] = [..];

/// Resolve cache provider by name from registry
///
/// # Returns
/// * `Ok(CacheBackend)` - Created store/scanner pair
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_cache_provider(config: &CacheProviderConfig) -> Result<CacheBackend, String> {
    if let Some(entry) = CACHE_PROVIDERS.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = CACHE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown cache provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered cache providers as (name, description) tuples
pub fn list_cache_providers() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<_> = CACHE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    providers.sort_unstable();
    providers
}
