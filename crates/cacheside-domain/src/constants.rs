//! Domain layer constants
//!
//! Values that are part of the cache contract itself. Deployment tunables
//! live in `cacheside_infrastructure::constants`.

/// Default TTL for entries written without an explicit TTL (5 minutes)
pub const DEFAULT_CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// Separator between a namespace and the rest of a key
pub const NAMESPACE_SEPARATOR: &str = ":";

/// Cursor value that starts and ends a keyspace scan
pub const SCAN_CURSOR_START: &str = "0";

/// Batch-size hint passed to each scan page request
pub const DEFAULT_SCAN_BATCH_SIZE: usize = 100;
