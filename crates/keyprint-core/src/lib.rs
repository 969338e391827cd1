//! # Keyprint Core
//!
//! Pure primitives for keyprint: public key decoding, colors, and geometry.
//!
//! This crate contains no I/O and no rendering. It is pure computation
//! over key bytes and the drawable primitives derived from them.
//!
//! ## Key Types
//!
//! - [`PublicKey`] - A key as supplied by the caller (raw bytes, hex, base58)
//! - [`CanonicalKey`] - The normalized byte sequence every generator seeds from
//! - [`Color`] - An RGBA color with stable string form
//! - [`Scene`] - An immutable list of [`Primitive`]s plus a [`Background`]
//!
//! ## Determinism
//!
//! Everything here is a pure function of its inputs. The same canonical
//! bytes always produce the same digests, colors, and geometry.

pub mod color;
pub mod digest;
pub mod error;
pub mod geometry;
pub mod key;

pub use color::{corrected_hsl, parse_fill_or_black, Color, Hsl};
pub use digest::{Blake2b512, Blake3Digest};
pub use error::{ColorParseError, DecodeError};
pub use geometry::{Background, Circle, Point, Polygon, Primitive, Scene, Winding};
pub use key::{decode_public_key, CanonicalKey, PublicKey};
