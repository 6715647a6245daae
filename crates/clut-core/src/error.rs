//! Error types for buffer construction.
//!
//! Every [`PixelBuffer`](crate::PixelBuffer) is validated once when it is
//! built, so the transform stages downstream can index it without checks.
//!
//! # Usage
//!
//! ```rust
//! use clut_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::new(4, 4, 2, vec![0.0; 32]).unwrap_err();
//! assert!(matches!(err, Error::ChannelMismatch { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or reshaping pixel buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or dimensions would cause
    /// integer overflow in buffer size calculations.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Not enough channels for a color lookup.
    #[error("channel mismatch: expected at least {expected}, got {got}")]
    ChannelMismatch {
        /// Minimum channel count
        expected: u32,
        /// Actual channel count
        got: u32,
    },

    /// Sample vector length does not match `width * height * channels`.
    #[error("buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSizeMismatch {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u32, got: u32) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Returns `true` if this is a dimension-related error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::BufferSizeMismatch { .. }
        )
    }
}
