//! Proptest generators for property-based testing.

use proptest::prelude::*;

use keyprint::{Algorithm, ImageFormat, PublicKey, MAX_SIZE};

use crate::fixtures::{ss58_encode, SUBSTRATE_PREFIX};

/// Generate 32 random key bytes.
pub fn key_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 32)
}

/// Generate key bytes of any non-empty length up to `max_len`.
pub fn raw_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len.max(1))
}

/// A 32-byte key together with its raw, hex and SS58 forms.
pub fn encoded_key() -> impl Strategy<Value = (Vec<u8>, [PublicKey; 3])> {
    key_bytes().prop_map(|bytes| {
        let keys = [
            PublicKey::Bytes(bytes.clone()),
            PublicKey::Hex(hex::encode(&bytes)),
            PublicKey::Base58(ss58_encode(SUBSTRATE_PREFIX, &bytes)),
        ];
        (bytes, keys)
    })
}

/// Generate a 32-byte key in a random encoding.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    (encoded_key(), 0usize..3).prop_map(|((_, keys), i)| keys[i].clone())
}

/// Generate a hex string that must fail to decode.
pub fn malformed_hex() -> impl Strategy<Value = String> {
    prop_oneof![
        // odd length
        "[0-9a-f]{1,31}".prop_filter("odd length", |s| s.len() % 2 == 1),
        // a non-hex character
        "[0-9a-f]{0,8}[g-z][0-9a-f]{0,8}",
    ]
}

pub fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Dots),
        Just(Algorithm::Blockies),
        Just(Algorithm::Jdenticon),
    ]
}

pub fn image_format() -> impl Strategy<Value = ImageFormat> {
    prop_oneof![Just(ImageFormat::Raster), Just(ImageFormat::Vector)]
}

/// Generate a valid icon size. Raster tests stay small to keep them fast.
pub fn size() -> impl Strategy<Value = u32> {
    prop_oneof![1u32..=64, Just(MAX_SIZE)]
}
