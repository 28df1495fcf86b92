//! Infrastructure layer constants
//!
//! Domain-level constants (default TTL, separator, cursor sentinel) live in
//! `cacheside_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cacheside.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cacheside";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CACHESIDE";

/// Separator for nested configuration keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Upper bound on scan pages for one namespace reset
pub const DEFAULT_MAX_SCAN_PAGES: u64 = 1_000_000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "CACHESIDE_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "cacheside";
