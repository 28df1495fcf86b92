//! Cache-aside service, namespace scanner and backend factory

pub mod factory;
pub mod scanner;
pub mod service;

pub use factory::{build_cache_service, create_backend};
pub use scanner::NamespaceScanner;
pub use service::CacheService;
