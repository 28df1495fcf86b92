//! Cache value objects

use crate::constants::SCAN_CURSOR_START;
use std::borrow::Cow;
use std::fmt;

/// Outcome of a cache read
///
/// Absence is a value, not an error: an expired or never-written key is
/// `Miss`, while an unreachable backend is an `Err` from the read itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead<T> {
    /// The key holds a value
    Hit(T),
    /// The key is absent or expired
    Miss,
}

impl<T> CacheRead<T> {
    /// True for `Hit`
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// True for `Miss`
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }

    /// Convert into an `Option`
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Hit(value) => Some(value),
            Self::Miss => None,
        }
    }

    /// Map the hit value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> CacheRead<U> {
        match self {
            Self::Hit(value) => CacheRead::Hit(f(value)),
            Self::Miss => CacheRead::Miss,
        }
    }
}

impl<T> From<Option<T>> for CacheRead<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Miss, Self::Hit)
    }
}

/// Opaque continuation token of a keyspace scan
///
/// A scan starts at [`ScanCursor::START`] and is complete once the backend
/// hands that same sentinel back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanCursor(Cow<'static, str>);

impl ScanCursor {
    /// Start (and end) sentinel
    pub const START: ScanCursor = ScanCursor(Cow::Borrowed(SCAN_CURSOR_START));

    /// Wrap a backend-issued cursor
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(Cow::Owned(token.into()))
    }

    /// Token as sent to the backend
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the start sentinel
    pub fn is_start(&self) -> bool {
        self.0 == SCAN_CURSOR_START
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for ScanCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a keyspace scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to request the next page with
    pub cursor: ScanCursor,
    /// Matching keys in this page (possibly empty)
    pub keys: Vec<String>,
}

impl ScanPage {
    /// Create a page
    pub fn new(cursor: ScanCursor, keys: Vec<String>) -> Self {
        Self { cursor, keys }
    }

    /// Whether the scan is complete after this page
    pub fn is_last(&self) -> bool {
        self.cursor.is_start()
    }
}
