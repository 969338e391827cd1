//! Error types for the render backends.

use thiserror::Error;

/// Errors that can occur while rendering a scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The scene has no area to render.
    #[error("scene size is zero")]
    ZeroSize,

    /// Output dimensions are zero or above the supported maximum.
    #[error("invalid output dimensions {width}x{height} (allowed 1..={max})")]
    InvalidDimensions { width: u32, height: u32, max: u32 },
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
