//! Hald CLUT image validation and extraction.
//!
//! A Hald image of level `N` is `N^3 x N^3` pixels. Read in row-major scan
//! order, pixel `i` is lattice node `i` with `i = r + g*A + b*A*A` and
//! `A = N^2`, so the image holds exactly `(N^3)^2 = A^3` nodes.
//!
//! ```text
//! level 2:  8x8 image   ->  4x4x4 lattice
//! level 4:  64x64       ->  16^3
//! level 8:  512x512     ->  64^3
//! ```

use crate::{Lattice, LutResult, ValidationError};
use clut_core::SourceImage;
use tracing::{debug, trace};

/// Returns `N` if `side == N^3`.
///
/// ```rust
/// use clut_lut::hald::cube_root;
///
/// assert_eq!(cube_root(512), Some(8));
/// assert_eq!(cube_root(100), None);
/// ```
pub fn cube_root(side: u32) -> Option<u32> {
    let n = floor_cube_root(side);
    (n.pow(3) == side).then_some(n)
}

/// Largest `N` with `N^3 <= side`.
///
/// `floor_cube_root(side)` and `floor_cube_root(side) + 1` are the nearest
/// Hald levels around a side that is not a cube.
pub fn floor_cube_root(side: u32) -> u32 {
    let mut n = (side as f64).cbrt().round() as u32;
    while n.checked_pow(3).is_none_or(|c| c > side) {
        n -= 1;
    }
    while (n + 1).checked_pow(3).is_some_and(|c| c <= side) {
        n += 1;
    }
    n
}

/// Checks the image geometry and returns its Hald level.
///
/// Squareness is checked before the cube test, so a `100x50` image is
/// [`NotSquare`](ValidationError::NotSquare) even though neither side is
/// a cube. A `1x1` image passes with level 1; [`load`] rejects it.
pub fn check(image: &SourceImage) -> LutResult<u32> {
    let (width, height) = (image.width(), image.height());
    if width != height {
        return Err(ValidationError::NotSquare { width, height });
    }
    cube_root(width).ok_or(ValidationError::NotPerfectCube { side: width })
}

/// `true` if the image is square with a perfect-cube side length.
pub fn validate(image: &SourceImage) -> bool {
    check(image).is_ok()
}

/// Extracts a [`Lattice`] from a decoded Hald image.
///
/// Copies channels 0..3 of every pixel in scan order; further channels
/// are ignored. The image is only read.
///
/// # Errors
///
/// - [`ValidationError::NotSquare`] / [`ValidationError::NotPerfectCube`]
///   as reported by [`check`]
/// - [`ValidationError::DegenerateLattice`] for level 1 (`A = 1`)
///
/// # Example
///
/// ```rust
/// use clut_core::SourceImage;
/// use clut_lut::{hald, ValidationError};
///
/// let not_cube = SourceImage::zeros(10, 10, 3).unwrap();
/// assert_eq!(
///     hald::load(&not_cube).unwrap_err(),
///     ValidationError::NotPerfectCube { side: 10 }
/// );
/// ```
pub fn load(image: &SourceImage) -> LutResult<Lattice> {
    let level = check(image)?;
    trace!(side = image.width(), level, "hald::load");

    let data: Vec<[f32; 3]> = image.pixels().map(|px| [px[0], px[1], px[2]]).collect();
    let lattice = Lattice::from_data(level, data)?;

    debug!(
        level,
        size = lattice.size(),
        side = image.width(),
        channels = image.channels(),
        "Loaded Hald CLUT"
    );
    Ok(lattice)
}

/// Builds an identity Hald image of the given level (RGB, `f32`).
///
/// Applying the lattice loaded from it leaves colors unchanged up to
/// rounding.
pub fn identity_image(level: u32) -> LutResult<SourceImage> {
    Lattice::identity(level)?.to_image()
}
