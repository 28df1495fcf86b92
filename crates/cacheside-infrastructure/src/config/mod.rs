//! Configuration management
//!
//! Layered configuration through Figment: defaults, then a TOML file, then
//! `CACHESIDE_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{AppConfig, CacheConfig, CacheProviderKind, FailureMode, LoggingConfig};
