//! Error handling types
//!
//! The taxonomy separates three very different situations that callers
//! must never confuse:
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | [`Error::NotFound`] | producers / domain services | the entity does not exist |
//! | [`Error::BackendUnavailable`] | cache adapters | the cache could not be reached |
//! | [`Error::ScanIncomplete`] | namespace reset | the cursor loop stopped before a full traversal |
//!
//! A cache miss is not an error at all; it is [`crate::CacheRead::Miss`].

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by several variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cacheside
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// The cache backend could not serve the request
    #[error("Cache backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A namespace reset stopped before visiting the whole keyspace
    #[error(
        "Namespace scan incomplete for '{namespace}' after {pages} page(s), {deleted} key(s) deleted: {reason}"
    )]
    ScanIncomplete {
        /// Namespace being reset
        namespace: String,
        /// Keys deleted before the scan stopped
        deleted: u64,
        /// Pages fetched before the scan stopped
        pages: u64,
        /// Why the scan stopped
        reason: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Value serialization or deserialization error
    #[error("Codec error: {message}")]
    Codec {
        /// Description of the codec failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Backend error creation methods
impl Error {
    /// Create a backend unavailable error
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend unavailable error with source
    pub fn backend_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a scan incomplete error, optionally wrapping the failure that stopped it
    pub fn scan_incomplete<N: Into<String>, R: Into<String>>(
        namespace: N,
        deleted: u64,
        pages: u64,
        reason: R,
        source: Option<Error>,
    ) -> Self {
        Self::ScanIncomplete {
            namespace: namespace.into(),
            deleted,
            pages,
            reason: reason.into(),
            source: source.map(|e| Box::new(e) as BoxedSource),
        }
    }
}

// Codec and configuration error creation methods
impl Error {
    /// Create a codec error with source
    pub fn codec_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Codec {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// True for domain-level "entity does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the cache backend could not be reached
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    /// True when a namespace reset stopped early
    pub fn is_scan_incomplete(&self) -> bool {
        matches!(self, Self::ScanIncomplete { .. })
    }

    /// Keys deleted before a namespace reset stopped, if this is a scan error
    pub fn partial_count(&self) -> Option<u64> {
        match self {
            Self::ScanIncomplete { deleted, .. } => Some(*deleted),
            _ => None,
        }
    }
}
