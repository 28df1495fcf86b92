//! # cacheside
//!
//! A cache-aside layer for services that read through a shared key-value
//! cache and evict derived entries by namespace after writes.
//!
//! ## Example
//!
//! ```ignore
//! use cacheside::{CacheService, InvalidationCoordinator, TaskChange};
//! use cacheside::application::keys::TaskKeys;
//! use std::sync::Arc;
//!
//! let cache = cacheside::build_cache_service(&config.cache)?;
//!
//! // Read path
//! let tasks: Vec<Task> = cache
//!     .wrap(&TaskKeys::page(1, 5), || repo.list(1, 5), Some(TaskKeys::PAGE_TTL))
//!     .await?;
//!
//! // Write path, after the commit
//! let report = InvalidationCoordinator::new(Arc::new(cache.clone()))
//!     .invalidate_for(&TaskChange::task(id).with_user(assignee))
//!     .await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - ports, value objects, error taxonomy
//! - `application` - provider registry, invalidation plans and coordinator
//! - `infrastructure` - cache service, namespace scanner, config, logging
//! - `providers` - Redis, Moka and null backends

/// Domain layer - ports, value objects and errors
pub mod domain {
    pub use cacheside_domain::*;
}

/// Application layer - registry and invalidation
pub mod application {
    pub use cacheside_application::*;
}

/// Infrastructure layer - cache service, config and logging
pub mod infrastructure {
    pub use cacheside_infrastructure::*;
}

/// Backend adapters
pub mod providers {
    pub use cacheside_providers::*;
}

pub use domain::{CacheRead, Error, Namespace, Result, build_key};
pub use application::{InvalidationCoordinator, InvalidationReport, TaskChange, UserChange};
pub use infrastructure::{AppConfig, CacheService, ConfigLoader, build_cache_service, init_logging};
