//! # clut-lut
//!
//! Hald CLUT decoding and 3D lattice sampling.
//!
//! A Hald CLUT of level `N` is a square image of side `N^3` whose pixels,
//! read in scan order, are the `(N^2)^3` nodes of a 3D color lookup table.
//! This crate turns such an image into a [`Lattice`] and samples it with
//! trilinear interpolation.
//!
//! # Usage
//!
//! ```rust
//! use clut_lut::{hald, Lattice};
//!
//! // A level-2 identity Hald image is 8x8 pixels, a 4x4x4 lattice
//! let image = hald::identity_image(2).unwrap();
//! assert!(hald::validate(&image));
//!
//! let lattice = hald::load(&image).unwrap();
//! assert_eq!(lattice.size(), 4);
//!
//! let rgb = lattice.sample([0.5, 0.3, 0.2]);
//! assert!((rgb[1] - 0.3).abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`clut-core`] - [`SourceImage`](clut_core::SourceImage)
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Load diagnostics
//!
//! # Used By
//!
//! - `clut-ops` - Buffer transforms and the lattice provider
//! - `clut-cli` - `info` / `identity` / `apply` commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lattice;
pub mod hald;

pub use error::{LutResult, ValidationError};
pub use hald::{check, identity_image, load, validate};
pub use lattice::{Lattice, MAX_LEVEL};
