//! Provider ports

pub mod cache;

pub use cache::{CacheBackend, CacheStore, KeyScanner};
