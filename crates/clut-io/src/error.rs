//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Unsupported color type, bit depth or channel layout.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Decoded data did not form a valid buffer.
    #[error(transparent)]
    Buffer(#[from] clut_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
