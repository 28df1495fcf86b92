//! # Domain Layer
//!
//! Core types of the cache-aside layer. Nothing here talks to a network;
//! adapters in `cacheside-providers` implement the ports defined below.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy (`NotFound`, `BackendUnavailable`, `ScanIncomplete`) |
//! | [`keys`] | Key construction and the [`Namespace`] convention |
//! | [`codec`] | Value codecs turning typed values into opaque payloads |
//! | [`value_objects`] | [`CacheRead`], [`ScanCursor`], [`ScanPage`] |
//! | [`ports`] | [`CacheStore`] and [`KeyScanner`] provider ports |
//! | [`constants`] | Contract-level constants |

pub mod codec;
pub mod constants;
pub mod error;
pub mod keys;
pub mod ports;
pub mod value_objects;

pub use codec::{JsonCodec, ValueCodec};
pub use error::{Error, Result};
pub use keys::{Namespace, build_key};
pub use ports::providers::cache::{CacheBackend, CacheStore, KeyScanner};
pub use value_objects::{CacheRead, ScanCursor, ScanPage};
