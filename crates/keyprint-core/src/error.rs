//! Error types for keyprint core.

use thiserror::Error;

/// Errors that can occur while normalizing a public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The key string is not valid in its declared encoding.
    #[error("invalid {encoding} encoding: {reason}")]
    InvalidEncoding {
        /// The declared encoding ("hex", "base58", "bytes").
        encoding: &'static str,
        /// What was wrong with the input.
        reason: String,
    },
}

impl DecodeError {
    pub(crate) fn invalid(encoding: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::InvalidEncoding {
            encoding,
            reason: reason.into(),
        }
    }
}

/// A fill-color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("unsupported color length {len} in {input:?}")]
    InvalidLength { input: String, len: usize },

    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}
