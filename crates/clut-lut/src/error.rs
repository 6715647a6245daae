//! Lattice validation errors.

use thiserror::Error;

/// Result type for lattice operations.
pub type LutResult<T> = Result<T, ValidationError>;

/// Reasons a source image cannot become a [`Lattice`](crate::Lattice).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Source image width differs from its height.
    #[error("Hald CLUT must be square, got {width}x{height}")]
    NotSquare {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Side length is not `N^3` for an integer `N`.
    #[error("Hald CLUT side {side} is not a perfect cube")]
    NotPerfectCube {
        /// Image side length
        side: u32,
    },

    /// Axis resolution below 2, no interpolation cube exists.
    #[error("degenerate lattice: level {level} gives {size} samples per axis (need at least 2)")]
    DegenerateLattice {
        /// Hald level
        level: u32,
        /// Samples per axis (`level^2`)
        size: usize,
    },

    /// Level whose image side `level^3` does not fit in `u32`.
    #[error("Hald level {level} exceeds the maximum of {max}")]
    LevelTooLarge {
        /// Requested level
        level: u32,
        /// Largest supported level
        max: u32,
    },

    /// Node storage for the lattice could not be allocated.
    #[error("cannot allocate {entries} lattice samples")]
    Allocation {
        /// `size^3`
        entries: usize,
    },

    /// The external decoder could not supply pixels for the source.
    #[error("lattice source unavailable: {0}")]
    SourceUnavailable(String),

    /// Raw sample data does not match the requested level.
    #[error("expected {expected} lattice samples, got {got}")]
    SampleCount {
        /// `size^3`
        expected: usize,
        /// Samples supplied
        got: usize,
    },

    /// Buffer construction failed while encoding a lattice as an image.
    #[error(transparent)]
    Buffer(#[from] clut_core::Error),
}

impl ValidationError {
    /// Creates a [`ValidationError::SourceUnavailable`] error.
    #[inline]
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable(reason.into())
    }

    /// `true` for errors that describe the image geometry itself.
    #[inline]
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            Self::NotSquare { .. }
                | Self::NotPerfectCube { .. }
                | Self::DegenerateLattice { .. }
                | Self::LevelTooLarge { .. }
        )
    }
}
