//! # Infrastructure Layer
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | [`CacheService`], [`NamespaceScanner`], backend factory |
//! | [`config`] | Figment-based configuration loading and validation |
//! | [`logging`] | tracing-subscriber setup |
//! | [`error_ext`] | Context helpers converting foreign errors |
//! | [`constants`] | Deployment defaults |

// Links the provider crate so its registry entries are present
extern crate cacheside_providers;

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use cache::{CacheService, NamespaceScanner, build_cache_service, create_backend};
pub use config::{AppConfig, CacheConfig, ConfigLoader, FailureMode, LoggingConfig};
pub use logging::init_logging;
