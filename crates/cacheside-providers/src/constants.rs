//! Provider constants

/// Default Redis URL when none is configured
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Default deadline for a single Redis round trip (milliseconds)
pub const REDIS_DEFAULT_OPERATION_TIMEOUT_MS: u64 = 2_000;

/// Default entry capacity of the in-memory cache
pub const MOKA_DEFAULT_CAPACITY: u64 = 100_000;

/// Prefix of cursors issued by the in-memory scanner
pub const MOKA_CURSOR_PREFIX: &str = "after:";
