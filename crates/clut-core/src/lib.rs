//! # clut-core
//!
//! Core types shared by the CLUT crates.
//!
//! - [`PixelBuffer`] - Flat, row-major `f32` image with interleaved channels
//! - [`SourceImage`] - A decoded Hald CLUT source (same layout as [`PixelBuffer`])
//! - [`Error`] / [`Result`] - Buffer construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! clut-core (this crate)
//!    ^
//!    |
//!    +-- clut-lut (lattice extraction, trilinear sampling)
//!    +-- clut-ops (buffer transforms, lattice provider)
//!    +-- clut-io  (PNG decoding/encoding)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;

pub use buffer::{PixelBuffer, SourceImage, MIN_CHANNELS};
pub use error::{Error, Result};
