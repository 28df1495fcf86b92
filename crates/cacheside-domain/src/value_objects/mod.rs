//! Value objects

pub mod cache;

pub use cache::{CacheRead, ScanCursor, ScanPage};
