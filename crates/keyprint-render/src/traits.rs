//! Renderer trait: the seam between scenes and image formats.

use keyprint_core::Scene;

use crate::error::Result;

/// A backend that draws a [`Scene`].
///
/// Implementations must not consult global state, caches or clocks; the
/// output is a function of the scene and the renderer's own options.
pub trait Renderer {
    /// The image type produced.
    type Output;

    /// Draw `scene` into a fresh output.
    fn render(&self, scene: &Scene) -> Result<Self::Output>;
}
