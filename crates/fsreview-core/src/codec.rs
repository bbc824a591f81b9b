//! Serializer boundary.
//!
//! The engine never depends on an encoding; artifacts pass through a
//! [`Codec`]. Two codecs exist: a compact machine encoding and a
//! human-readable text encoding. [`CodecKind`] picks one by file extension.

use crate::errors::{ExError, ExErrorKind, FsReviewError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Encode/decode capability for a value type
pub trait Codec<T> {
    /// File extension (without dot) used for artifacts in this encoding
    fn extension(&self) -> &'static str;

    /// Encode a value to bytes.
    ///
    /// # Errors
    ///
    /// `Serialization` if the value cannot be represented.
    fn encode(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes into a value.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes do not parse into `T`.
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact machine encoding (single-line JSON)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactCodec;

/// Human-readable encoding (YAML)
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl<T: Serialize + DeserializeOwned> Codec<T> for CompactCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("compact_encode")
                .with_message(e.to_string())
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            ExError::new(ExErrorKind::Decode)
                .with_op("compact_decode")
                .with_message(e.to_string())
        })
    }
}

impl<T: Serialize + DeserializeOwned> Codec<T> for TextCodec {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("text_encode")
                    .with_message(e.to_string())
            })
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        serde_yaml::from_slice(bytes).map_err(|e| {
            ExError::new(ExErrorKind::Decode)
                .with_op("text_decode")
                .with_message(e.to_string())
        })
    }
}

/// Runtime choice between the two codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Compact,
    Text,
}

impl CodecKind {
    /// Every extension a recognized artifact may carry
    pub const EXTENSIONS: &'static [&'static str] = &["json", "yaml", "yml"];

    /// Select a codec from the extension of `path`.
    ///
    /// # Errors
    ///
    /// `ConfigError` for a missing or unrecognized extension.
    pub fn for_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(CodecKind::Compact),
            Some("yaml") | Some("yml") => Ok(CodecKind::Text),
            _ => Err(FsReviewError::UnknownEncoding {
                path: path.display().to_string(),
            }
            .into()),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            CodecKind::Compact => "json",
            CodecKind::Text => "yaml",
        }
    }

    /// Encode with the selected codec.
    ///
    /// # Errors
    ///
    /// See [`Codec::encode`].
    pub fn encode<T: Serialize + DeserializeOwned>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            CodecKind::Compact => CompactCodec.encode(value),
            CodecKind::Text => TextCodec.encode(value),
        }
    }

    /// Decode with the selected codec.
    ///
    /// # Errors
    ///
    /// See [`Codec::decode`].
    pub fn decode<T: Serialize + DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            CodecKind::Compact => CompactCodec.decode(bytes),
            CodecKind::Text => TextCodec.decode(bytes),
        }
    }
}
