//! # Keyprint
//!
//! Deterministic identicons for public keys. A key is decoded to canonical
//! bytes, turned into an immutable scene by one of three algorithms, and
//! drawn by a raster or vector backend.
//!
//! ## Overview
//!
//! - **Dots**: 19 circles in a hexagon, colored by a weighted scheme
//!   catalogue (Polkadot style)
//! - **Blockies**: a left-right mirrored grid of three colors
//! - **Jdenticon**: rotated polygons and circles with a hue-corrected theme
//!
//! The same key, algorithm and size always produce the same image, byte
//! for byte. Malformed keys are rejected; no placeholder image is ever
//! returned for them.
//!
//! ## Usage
//!
//! ```rust
//! use keyprint::{generate, Algorithm, ImageFormat, PublicKey};
//!
//! let key = PublicKey::Hex(
//!     "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d".into(),
//! );
//! let image = generate(&key, Algorithm::Dots, 64, ImageFormat::Vector).unwrap();
//! assert!(image.as_vector().unwrap().as_str().starts_with("<svg"));
//! ```
//!
//! ## Re-exports
//!
//! - `keyprint::core` - Keys, colors and geometry
//! - `keyprint::generators` - The three algorithms
//! - `keyprint::render` - Raster and SVG backends

pub mod config;
pub mod error;
pub mod ffi;
pub mod generator;

// Re-export component crates
pub use keyprint_core as core;
pub use keyprint_generators as generators;
pub use keyprint_render as render;

pub use config::GeneratorConfig;
pub use error::{KeyprintError, Result};
pub use generator::{generate, Algorithm, IdenticonGenerator, Image, ImageFormat, Keyprint, MAX_SIZE};

pub use keyprint_core::{CanonicalKey, Color, DecodeError, PublicKey, Scene};
pub use keyprint_generators::Generator;
pub use keyprint_render::{Bitmap, SvgDocument};
