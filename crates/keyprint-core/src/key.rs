//! Public key normalization.
//!
//! Callers hand over keys in whatever form the key-management layer keeps
//! them. Every generator seeds from the same [`CanonicalKey`], so a key
//! given as hex, base58 or raw bytes yields the same identicon.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// SS58 checksum length in bytes.
const SS58_CHECKSUM_LEN: usize = 2;

/// Payload lengths of SS58 addresses (sr25519/ed25519 and ecdsa keys).
const SS58_PAYLOAD_LENS: [usize; 2] = [32, 33];

/// A public key as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "value", rename_all = "lowercase")]
pub enum PublicKey {
    /// Raw key bytes, passed through unchanged.
    Bytes(Vec<u8>),
    /// Hex string, optionally `0x`-prefixed.
    Hex(String),
    /// Base58 string. SS58 addresses yield their embedded key.
    Base58(String),
}

impl PublicKey {
    /// Normalize into canonical bytes.
    pub fn decode(&self) -> Result<CanonicalKey, DecodeError> {
        decode_public_key(self)
    }

    /// Name of the encoding this key was supplied in.
    pub fn encoding(&self) -> &'static str {
        match self {
            PublicKey::Bytes(_) => "bytes",
            PublicKey::Hex(_) => "hex",
            PublicKey::Base58(_) => "base58",
        }
    }
}

impl From<Vec<u8>> for PublicKey {
    fn from(bytes: Vec<u8>) -> Self {
        PublicKey::Bytes(bytes)
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        PublicKey::Bytes(bytes.to_vec())
    }
}

/// Decode a public key into its canonical byte sequence.
///
/// Never truncates or pads: malformed input is rejected with
/// [`DecodeError::InvalidEncoding`].
pub fn decode_public_key(key: &PublicKey) -> Result<CanonicalKey, DecodeError> {
    let bytes = match key {
        PublicKey::Bytes(bytes) => bytes.clone(),
        PublicKey::Hex(s) => decode_hex(s)?,
        PublicKey::Base58(s) => decode_base58(s)?,
    };

    if bytes.is_empty() {
        return Err(DecodeError::invalid(key.encoding(), "empty key"));
    }

    Ok(CanonicalKey(bytes))
}

fn decode_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    hex::decode(digits).map_err(|e| DecodeError::invalid("hex", e.to_string()))
}

fn decode_base58(s: &str) -> Result<Vec<u8>, DecodeError> {
    let decoded = bs58::decode(s)
        .into_vec()
        .map_err(|e| DecodeError::invalid("base58", e.to_string()))?;

    Ok(match ss58_payload(&decoded) {
        Some(payload) => payload.to_vec(),
        None => decoded,
    })
}

/// Extract the key embedded in an SS58 address layout.
///
/// Layout: `prefix (1 or 2 bytes) || key (32 or 33 bytes) || checksum (2 bytes)`.
/// The checksum is not validated here.
fn ss58_payload(decoded: &[u8]) -> Option<&[u8]> {
    let prefix_len = match decoded.first()? {
        0..=63 => 1,
        64..=127 => 2,
        _ => return None,
    };

    let payload_len = decoded
        .len()
        .checked_sub(prefix_len + SS58_CHECKSUM_LEN)?;

    if !SS58_PAYLOAD_LENS.contains(&payload_len) {
        return None;
    }

    Some(&decoded[prefix_len..prefix_len + payload_len])
}

/// The normalized byte representation of a public key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalKey(Vec<u8>);

impl CanonicalKey {
    /// Wrap bytes that are already canonical.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of key bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to lowercase hex string (no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "CanonicalKey({})", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for CanonicalKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for CanonicalKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.to_vec())
    }
}
