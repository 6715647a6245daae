//! # clut-ops
//!
//! Applies Hald CLUT lattices to whole images and manages the active
//! lattice for a host pipeline.
//!
//! # Modules
//!
//! - [`apply`] - `ApplyTransform`: identity copy or per-pixel trilinear lookup
//! - [`config`] - [`ApplyConfig`] (serial/parallel, rows per task, threads)
//! - [`provider`] - [`LatticeSlot`] snapshots and the [`LatticeProvider`] seam
//!
//! # Example
//!
//! ```rust
//! use clut_core::PixelBuffer;
//! use clut_lut::Lattice;
//! use clut_ops::apply_transform;
//!
//! let image = PixelBuffer::from_fn(16, 16, 4, |x, y, px| {
//!     px[0] = x as f32 / 15.0;
//!     px[1] = y as f32 / 15.0;
//!     px[3] = 1.0;
//! })
//! .unwrap();
//!
//! // No lattice: identity
//! let same = apply_transform(None, &image);
//! assert_eq!(same, image);
//!
//! let lattice = Lattice::identity(2).unwrap();
//! let graded = apply_transform(Some(&lattice), &image);
//! assert_eq!(graded.pixel(3, 0)[3], 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod apply;
pub mod config;
pub mod provider;

pub use apply::{apply_in_place, apply_transform, apply_transform_with};
pub use config::ApplyConfig;
pub use error::{OpsError, OpsResult};
pub use provider::{LatticeProvider, LatticeSlot, LatticeSnapshot, SlotProvider, SourceDecoder};
