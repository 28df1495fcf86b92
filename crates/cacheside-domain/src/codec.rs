//! Value codecs
//!
//! The backend stores opaque byte payloads. A codec is the one place that
//! knows how typed values become bytes, so a deployment picks a single
//! format and every reader and writer agrees on it.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize/deserialize contract for cached values
pub trait ValueCodec: Send + Sync + std::fmt::Debug + 'static {
    /// Encode a value into a backend payload
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode a backend payload into a value
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Short identifier of the format (e.g. `"json"`)
    fn name(&self) -> &'static str;
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value)
            .map_err(|e| Error::codec_with_source("Failed to serialize value for cache", e))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::codec_with_source("Failed to deserialize cached value", e))
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
