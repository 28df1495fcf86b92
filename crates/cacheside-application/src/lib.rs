//! # Application Layer
//!
//! Orchestration on top of the domain ports:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ports`] | Provider registry and the invalidation port implemented by the cache service |
//! | [`invalidation`] | Maps committed writes to the namespaces that must be evicted |
//! | [`keys`] | Key catalog of the cached task and user read models |

pub mod invalidation;
pub mod keys;
pub mod ports;

pub use invalidation::{
    CacheDependents, InvalidationCoordinator, InvalidationFailure, InvalidationReport,
    InvalidationRequest, TaskChange, UserChange,
};
pub use ports::services::CacheInvalidator;
