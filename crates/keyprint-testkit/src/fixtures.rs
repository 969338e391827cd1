//! Test fixtures and helpers.
//!
//! Keys here are real ed25519 public keys, so tests exercise the same
//! inputs the key-management layer hands over.

use blake2_rfc::blake2b::Blake2b;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use keyprint::PublicKey;

/// SS58 address prefix of generic Substrate chains.
pub const SUBSTRATE_PREFIX: u8 = 42;

const SS58_CONTEXT: &[u8] = b"SS58PRE";

/// Encode a key as an SS58 address with a one-byte prefix.
///
/// # Panics
///
/// Panics if `prefix` is 64 or above (two-byte prefixes are not needed by
/// any fixture).
pub fn ss58_encode(prefix: u8, key: &[u8]) -> String {
    assert!(prefix < 64, "two-byte SS58 prefixes are not supported");

    let mut data = Vec::with_capacity(key.len() + 3);
    data.push(prefix);
    data.extend_from_slice(key);

    let mut hasher = Blake2b::new(64);
    hasher.update(SS58_CONTEXT);
    hasher.update(&data);
    let checksum = hasher.finalize();
    data.extend_from_slice(&checksum.as_bytes()[..2]);

    bs58::encode(data).into_string()
}

/// A keypair whose public half feeds the identicon pipeline.
pub struct TestFixture {
    pub signing_key: SigningKey,
}

impl TestFixture {
    /// Create a fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn bytes_key(&self) -> PublicKey {
        PublicKey::Bytes(self.public_key_bytes().to_vec())
    }

    pub fn hex_key(&self) -> PublicKey {
        PublicKey::Hex(hex::encode(self.public_key_bytes()))
    }

    /// The key as a generic Substrate SS58 address.
    pub fn ss58_key(&self) -> PublicKey {
        PublicKey::Base58(ss58_encode(SUBSTRATE_PREFIX, &self.public_key_bytes()))
    }

    /// The same key in every supported encoding.
    pub fn all_encodings(&self) -> [PublicKey; 3] {
        [self.bytes_key(), self.hex_key(), self.ss58_key()]
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create `n` fixtures with distinct deterministic keys.
pub fn multi_party_fixtures(n: usize) -> Vec<TestFixture> {
    (0..n)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}
