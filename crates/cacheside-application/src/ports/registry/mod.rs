//! Provider registries
//!
//! Providers register themselves at link time through `linkme`
//! distributed slices and are resolved by name from configuration.

pub mod cache;

pub use cache::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, list_cache_providers,
    resolve_cache_provider,
};
