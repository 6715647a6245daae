//! # clut-io
//!
//! Image file support for the CLUT tools.
//!
//! - [`png`] - Read/write PNG files as [`PixelBuffer`](clut_core::PixelBuffer)
//! - [`PngDecoder`] - [`SourceDecoder`](clut_ops::SourceDecoder) that loads
//!   Hald CLUT sources from PNG files
//!
//! Samples are normalised to `[0, 1]` on read and quantised on write.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;
mod source;

pub use error::{IoError, IoResult};
pub use crate::png::BitDepth;
pub use source::PngDecoder;
