//! Content fingerprints.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

/// Hash algorithm used to produce a fingerprint value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FingerprintMethod {
    Sha256,
    Sha512,
}

impl FingerprintMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintMethod::Sha256 => "SHA256",
            FingerprintMethod::Sha512 => "SHA512",
        }
    }
}

impl std::fmt::Display for FingerprintMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named hash algorithm plus its hex digest.
///
/// Two fingerprints are equal iff method and value both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub method: FingerprintMethod,
    pub value: String,
}

impl Fingerprint {
    pub fn new(method: FingerprintMethod, value: impl Into<String>) -> Self {
        Self {
            method,
            value: value.into(),
        }
    }

    /// Fingerprint raw bytes with the given method (hex-encoded digest)
    pub fn of_bytes(method: FingerprintMethod, bytes: &[u8]) -> Self {
        let value = match method {
            FingerprintMethod::Sha256 => hex::encode(Sha256::digest(bytes)),
            FingerprintMethod::Sha512 => hex::encode(Sha512::digest(bytes)),
        };
        Self { method, value }
    }

    /// SHA-256 fingerprint of raw bytes
    pub fn sha256(bytes: &[u8]) -> Self {
        Self::of_bytes(FingerprintMethod::Sha256, bytes)
    }

    /// True when `bytes` hash to this fingerprint under its own method
    pub fn matches_bytes(&self, bytes: &[u8]) -> bool {
        Self::of_bytes(self.method, bytes).value == self.value
    }
}
