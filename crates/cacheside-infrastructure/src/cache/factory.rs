//! Backend construction from configuration

use cacheside_application::ports::registry::{CacheProviderConfig, resolve_cache_provider};
use cacheside_domain::CacheBackend;
use cacheside_domain::error::{Error, Result};
use tracing::info;

use super::service::CacheService;
use crate::config::CacheConfig;

/// Resolve the configured provider from the registry
///
/// A disabled cache always resolves to the null provider.
pub fn create_backend(config: &CacheConfig) -> Result<CacheBackend> {
    let kind = config.effective_provider();

    let mut provider_config = CacheProviderConfig::new(kind.as_str())
        .with_max_capacity(config.max_capacity)
        .with_operation_timeout(config.operation_timeout());
    if let Some(url) = &config.redis_url {
        provider_config = provider_config.with_uri(url.clone());
    }

    let backend = resolve_cache_provider(&provider_config).map_err(|e| {
        Error::configuration(format!("Failed to create cache backend '{kind}': {e}"))
    })?;

    info!(provider = backend.provider_name(), "cache backend ready");
    Ok(backend)
}

/// Build a [`CacheService`] for `config`
pub fn build_cache_service(config: &CacheConfig) -> Result<CacheService> {
    Ok(CacheService::from_config(create_backend(config)?, config))
}
