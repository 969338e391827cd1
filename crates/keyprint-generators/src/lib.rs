//! # Keyprint Generators
//!
//! The three identicon algorithms. Each turns a [`CanonicalKey`] into an
//! immutable [`Scene`] that any renderer can draw.
//!
//! ## Algorithms
//!
//! - [`DotsGenerator`] - 19 circles in a hexagonal template, colored from a
//!   frequency-weighted scheme catalogue (Polkadot style)
//! - [`BlockiesGenerator`] - a left-right mirrored grid of three colors
//! - [`JdenticonGenerator`] - rotated polygons and circles on a 4×4 cell grid
//!
//! ## Determinism
//!
//! No generator holds mutable state. The same key and size always produce
//! an identical scene, on every run and every platform.

pub mod blockies;
pub mod dots;
pub mod jdenticon;
pub mod prng;

use keyprint_core::{CanonicalKey, Scene};

pub use blockies::{BlockiesColors, BlockiesConfig, BlockiesGenerator, Cell, PixelGrid};
pub use dots::{ColorScheme, DotsGenerator, DOTS_SCHEMES};
pub use jdenticon::{JdenticonConfig, JdenticonGenerator};
pub use prng::{string_hash, Lcg48};

/// An identicon algorithm.
pub trait Generator {
    /// Short algorithm name, used in logs.
    fn name(&self) -> &'static str;

    /// Build the scene for `key` in a `size × size` icon space.
    fn scene(&self, key: &CanonicalKey, size: u32) -> Scene;
}
