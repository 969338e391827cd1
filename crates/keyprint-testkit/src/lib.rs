//! # Keyprint Testkit
//!
//! Testing utilities for keyprint.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known keys with expected identicon properties, shared
//!   by every implementation that must render the same icons
//! - **Generators**: Proptest strategies for keys in every encoding
//! - **Fixtures**: Real ed25519 keypairs with their hex and SS58 forms
//!
//! ## Golden Vectors
//!
//! ```rust
//! use keyprint_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! assert!(!all_vectors().is_empty());
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use keyprint_testkit::generators::{algorithm, encoded_key};
//!
//! proptest! {
//!     #[test]
//!     fn encodings_agree((bytes, keys) in encoded_key(), algo in algorithm()) {
//!         // every encoding of `bytes` yields the same image
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use keyprint_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([7; 32]);
//! assert_eq!(fixture.hex_key().decode().unwrap(), fixture.ss58_key().decode().unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, ss58_encode, TestFixture, SUBSTRATE_PREFIX};
pub use generators::{algorithm, encoded_key, image_format, key_bytes, public_key, size};
pub use vectors::{all_vectors, verify_all_vectors, verify_vector, GoldenVector};
