//! 3-dimensional color lattice decoded from a Hald CLUT.
//!
//! The lattice maps RGB input to RGB output through a cube of `A^3` nodes,
//! `A = N^2` for a Hald level `N`. Lookups use trilinear interpolation
//! with a fixed evaluation order (red, then green, then blue) so results
//! are reproducible bit for bit.

use crate::{LutResult, ValidationError};
use clut_core::SourceImage;

/// Largest Hald level whose image side `level^3` fits in `u32`.
pub const MAX_LEVEL: u32 = 1625;

/// A 3D color lookup table.
///
/// # Structure
///
/// - `size^3` entries, each containing RGB output values
/// - Stored in R-major order: R varies fastest, then G, then B
/// - `size = level^2`, at least 2
///
/// # Example
///
/// ```rust
/// use clut_lut::Lattice;
///
/// let lattice = Lattice::identity(3).unwrap();
/// assert_eq!(lattice.size(), 9);
/// assert_eq!(lattice.source_side(), 27);
///
/// let out = lattice.sample([0.25, 0.5, 0.75]);
/// assert!((out[2] - 0.75).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    /// Nodes: [(r0,g0,b0), (r1,g0,b0), ..., (rA,gA,bA)]
    data: Vec<[f32; 3]>,
    /// Samples per axis (A)
    size: usize,
    /// Hald level (N)
    level: u32,
}

impl Lattice {
    /// Creates a lattice from raw node data.
    ///
    /// Data must be in R-major order with exactly `(level^2)^3` entries.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DegenerateLattice`] if `level^2 < 2`
    /// - [`ValidationError::LevelTooLarge`] above [`MAX_LEVEL`]
    /// - [`ValidationError::SampleCount`] on a length mismatch
    pub fn from_data(level: u32, data: Vec<[f32; 3]>) -> LutResult<Self> {
        let (size, expected) = axis_size(level)?;
        if data.len() != expected {
            return Err(ValidationError::SampleCount {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { data, size, level })
    }

    /// Creates an identity (pass-through) lattice.
    ///
    /// Node `(r, g, b)` holds `(r, g, b) / (A - 1)`.
    ///
    /// Returns [`ValidationError::Allocation`] instead of aborting when the
    /// node storage cannot be reserved.
    pub fn identity(level: u32) -> LutResult<Self> {
        let (size, entries) = axis_size(level)?;
        let mut data = Vec::new();
        data.try_reserve_exact(entries)
            .map_err(|_| ValidationError::Allocation { entries })?;
        data.extend((0..entries).map(|i| identity_node(i, size)));
        Ok(Self { data, size, level })
    }

    /// Hald level `N`.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Samples per axis, `A = N^2`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side of the Hald image this lattice encodes, `N^3`.
    ///
    /// Cannot overflow: construction rejects levels above [`MAX_LEVEL`].
    #[inline]
    pub fn source_side(&self) -> u32 {
        self.level * self.level * self.level
    }

    /// Returns the total number of entries in the lattice.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Node data in R-major order.
    #[inline]
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Flat index of node `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Gets the node at grid position `(r, g, b)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is `>= size`.
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        assert!(r < self.size && g < self.size && b < self.size);
        self.data[self.index(r, g, b)]
    }

    /// Selects the interpolation cube for an input color.
    ///
    /// Returns the lower corner index on each axis, clamped to
    /// `[0, size - 2]`, and the fractional position measured from that
    /// clamped corner. Inputs of exactly 1.0 therefore land in the last
    /// cube with weight 1.0; values outside [0, 1] extrapolate from the
    /// nearest edge cube. NaN selects index 0.
    #[inline]
    pub fn locate(&self, rgb: [f32; 3]) -> ([usize; 3], [f32; 3]) {
        let n = (self.size - 1) as f32;
        let last = self.size - 2;

        let mut idx = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for c in 0..3 {
            let pos = rgb[c] * n;
            // float -> usize saturates: negatives and NaN become 0
            let i = (pos.floor() as usize).min(last);
            idx[c] = i;
            frac[c] = pos - i as f32;
        }
        (idx, frac)
    }

    /// Applies the lattice to an RGB value.
    ///
    /// Trilinear interpolation: four lerps along red, two along green,
    /// one along blue. Output is not clamped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use clut_lut::Lattice;
    ///
    /// let lattice = Lattice::identity(2).unwrap();
    /// let output = lattice.sample([1.0, 0.0, 0.5]);
    /// assert_eq!(output[0], 1.0);
    /// ```
    #[inline]
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        let ([ri, gi, bi], [rf, gf, bf]) = self.locate(rgb);

        let a = self.size;
        let aa = a * a;
        let base = ri + gi * a + bi * aa;

        // Get the 8 corner values
        let c000 = self.data[base];
        let c100 = self.data[base + 1];
        let c010 = self.data[base + a];
        let c110 = self.data[base + a + 1];
        let c001 = self.data[base + aa];
        let c101 = self.data[base + aa + 1];
        let c011 = self.data[base + aa + a];
        let c111 = self.data[base + aa + a + 1];

        let mut result = [0.0f32; 3];
        for i in 0..3 {
            let c00 = lerp(c000[i], c100[i], rf);
            let c10 = lerp(c010[i], c110[i], rf);
            let c01 = lerp(c001[i], c101[i], rf);
            let c11 = lerp(c011[i], c111[i], rf);

            let c0 = lerp(c00, c10, gf);
            let c1 = lerp(c01, c11, gf);

            result[i] = lerp(c0, c1, bf);
        }

        result
    }

    /// Encodes the lattice back into a Hald image (3 channels).
    ///
    /// Loading the result with [`crate::load`] gives an equal lattice.
    pub fn to_image(&self) -> LutResult<SourceImage> {
        let side = self.source_side();
        let flat: Vec<f32> = self.data.iter().flatten().copied().collect();
        Ok(SourceImage::new(side, side, 3, flat)?)
    }
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Axis resolution and node count for a level.
///
/// Rejects lattices without an interior cube and levels whose node count
/// is not addressable.
fn axis_size(level: u32) -> LutResult<(usize, usize)> {
    let too_large = ValidationError::LevelTooLarge {
        level,
        max: MAX_LEVEL,
    };
    if level > MAX_LEVEL {
        return Err(too_large);
    }
    let size = (level as usize)
        .checked_mul(level as usize)
        .ok_or_else(|| too_large.clone())?;
    if size < 2 {
        return Err(ValidationError::DegenerateLattice { level, size });
    }
    let entries = size
        .checked_mul(size)
        .and_then(|sq| sq.checked_mul(size))
        .ok_or(too_large)?;
    Ok((size, entries))
}

/// Identity color of the node at flat index `i`.
fn identity_node(i: usize, size: usize) -> [f32; 3] {
    let n = (size - 1) as f32;
    let r = i % size;
    let g = (i / size) % size;
    let b = i / (size * size);
    [r as f32 / n, g as f32 / n, b as f32 / n]
}
