//! Digests used to seed the generators.
//!
//! Wraps BLAKE2b-512 and BLAKE3 with strong types.

use std::fmt;

/// A 64-byte unkeyed BLAKE2b digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blake2b512(pub [u8; 64]);

impl Blake2b512 {
    /// Compute the BLAKE2b-512 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let digest = blake2_rfc::blake2b::blake2b(64, &[], data);
        let mut out = [0u8; 64];
        out.copy_from_slice(digest.as_bytes());
        Self(out)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Byte-wise wrapping difference `self - other`.
    pub fn wrapping_sub(&self, other: &Self) -> [u8; 64] {
        let mut out = [0u8; 64];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i].wrapping_sub(other.0[i]);
        }
        out
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Blake2b512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake2b512({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake2b512 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte BLAKE3 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blake3Digest(pub [u8; 32]);

impl Blake3Digest {
    /// Compute the BLAKE3 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Blake3Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake3Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
