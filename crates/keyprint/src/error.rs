//! Error types for the keyprint API.

use keyprint_core::DecodeError;
use keyprint_render::RenderError;
use thiserror::Error;

/// Errors that can occur while generating an identicon.
#[derive(Debug, Error)]
pub enum KeyprintError {
    /// The public key could not be decoded. No image is produced.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The renderer rejected the scene.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Requested icon size outside `1..=max`.
    #[error("invalid size {size} (allowed 1..={max})")]
    InvalidSize { size: u32, max: u32 },

    /// Unrecognized algorithm tag.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Unrecognized image format tag.
    #[error("unknown image format: {0}")]
    UnknownFormat(String),

    /// Unrecognized key encoding tag.
    #[error("unknown key encoding: {0}")]
    UnknownEncoding(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for keyprint operations.
pub type Result<T> = std::result::Result<T, KeyprintError>;
