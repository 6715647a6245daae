//! Applying a lattice to an image buffer.
//!
//! Every output pixel depends only on the input pixel at the same position
//! and the shared, read-only [`Lattice`], so rows are split across rayon
//! workers with no ordering between them. The hot loop does not allocate,
//! lock or perform I/O.
//!
//! # Example
//!
//! ```rust
//! use clut_core::PixelBuffer;
//! use clut_lut::Lattice;
//! use clut_ops::{apply_transform_with, ApplyConfig};
//!
//! let src = PixelBuffer::zeros(64, 32, 3).unwrap();
//! let lattice = Lattice::identity(2).unwrap();
//! let out = apply_transform_with(Some(&lattice), &src, &ApplyConfig::serial()).unwrap();
//! assert_eq!(out, src);
//! ```

use crate::{ApplyConfig, OpsResult};
use clut_core::PixelBuffer;
use clut_lut::Lattice;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Remaps every pixel of `input` through `lattice`.
///
/// With `None` the output is a plain copy of the input. Otherwise channels
/// 0..3 of each pixel are replaced by [`Lattice::sample`] and any further
/// channels are copied unchanged. Uses the default [`ApplyConfig`].
pub fn apply_transform(lattice: Option<&Lattice>, input: &PixelBuffer) -> PixelBuffer {
    let mut output = input.clone();
    if let Some(lattice) = lattice {
        log_pass(lattice, input);
        let config = ApplyConfig::default();
        run(lattice, &mut output, &config);
    } else {
        trace!(width = input.width(), height = input.height(), "apply: identity copy");
    }
    output
}

/// [`apply_transform`] with explicit scheduling.
///
/// # Errors
///
/// Returns [`OpsError`](crate::OpsError) if `config` is invalid or its dedicated pool
/// cannot be built.
pub fn apply_transform_with(
    lattice: Option<&Lattice>,
    input: &PixelBuffer,
    config: &ApplyConfig,
) -> OpsResult<PixelBuffer> {
    config.validate()?;
    let mut output = input.clone();
    if let Some(lattice) = lattice {
        apply_in_place(lattice, &mut output, config)?;
    }
    Ok(output)
}

/// Remaps `buffer` in place.
pub fn apply_in_place(
    lattice: &Lattice,
    buffer: &mut PixelBuffer,
    config: &ApplyConfig,
) -> OpsResult<()> {
    config.validate()?;
    log_pass(lattice, buffer);

    match config.threads {
        #[cfg(feature = "parallel")]
        Some(threads) if config.parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| crate::OpsError::ThreadPool(e.to_string()))?;
            pool.install(|| run(lattice, buffer, config));
        }
        _ => run(lattice, buffer, config),
    }
    Ok(())
}

fn log_pass(lattice: &Lattice, buffer: &PixelBuffer) {
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        level = lattice.level(),
        "Applying Hald CLUT"
    );
}

/// Dispatches rows to the serial or parallel path.
fn run(lattice: &Lattice, buffer: &mut PixelBuffer, config: &ApplyConfig) {
    let channels = buffer.channels() as usize;

    #[cfg(feature = "parallel")]
    if config.parallel {
        // a chunk longer than the buffer is one task
        let chunk = buffer.row_len().saturating_mul(config.rows_per_task);
        buffer
            .data_mut()
            .par_chunks_mut(chunk)
            .for_each(|rows| transform_rows(lattice, rows, channels));
        return;
    }

    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for row in buffer.rows_mut() {
        transform_rows(lattice, row, channels);
    }
}

/// Per-pixel loop over whole rows.
#[inline]
fn transform_rows(lattice: &Lattice, rows: &mut [f32], channels: usize) {
    for px in rows.chunks_exact_mut(channels) {
        let rgb = lattice.sample([px[0], px[1], px[2]]);
        px[..3].copy_from_slice(&rgb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gradient(width: u32, height: u32, channels: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, channels, |x, y, px| {
            px[0] = x as f32 / (width - 1) as f32;
            px[1] = y as f32 / (height - 1) as f32;
            px[2] = ((x + y) % 7) as f32 / 6.0;
            for (c, v) in px.iter_mut().enumerate().skip(3) {
                *v = c as f32 * 10.0 + x as f32;
            }
        })
        .unwrap()
    }

    /// Lattice that swaps red and blue and darkens green.
    fn swap_lattice() -> Lattice {
        let id = Lattice::identity(2).unwrap();
        let data = id.data().iter().map(|&[r, g, b]| [b, g * 0.5, r]).collect();
        Lattice::from_data(2, data).unwrap()
    }

    #[test]
    fn test_identity_mode_copies() {
        let src = gradient(17, 9, 4);
        let out = apply_transform(None, &src);
        assert_eq!(out, src);
    }

    #[test]
    fn test_identity_lattice_reproduces_input() {
        let src = gradient(33, 21, 3);
        let lattice = Lattice::identity(3).unwrap();
        let out = apply_transform(Some(&lattice), &src);
        for (a, b) in src.data().iter().zip(out.data()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_extra_channels_pass_through() {
        let src = gradient(8, 8, 5);
        let out = apply_transform(Some(&swap_lattice()), &src);
        for (a, b) in src.pixels().zip(out.pixels()) {
            assert_eq!(&a[3..], &b[3..]);
            assert_abs_diff_eq!(b[0], a[2], epsilon = 1e-5);
            assert_abs_diff_eq!(b[1], a[1] * 0.5, epsilon = 1e-5);
            assert_abs_diff_eq!(b[2], a[0], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_serial_matches_parallel() {
        let src = gradient(61, 47, 4);
        let lattice = swap_lattice();

        let serial = apply_transform_with(Some(&lattice), &src, &ApplyConfig::serial()).unwrap();
        let default = apply_transform(Some(&lattice), &src);
        let odd = apply_transform_with(
            Some(&lattice),
            &src,
            &ApplyConfig::default().rows_per_task(3).threads(3),
        )
        .unwrap();

        let bits = |b: &PixelBuffer| b.data().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&serial), bits(&default));
        assert_eq!(bits(&serial), bits(&odd));
    }

    #[test]
    fn test_in_place() {
        let src = gradient(10, 10, 3);
        let lattice = swap_lattice();
        let mut buf = src.clone();
        apply_in_place(&lattice, &mut buf, &ApplyConfig::default()).unwrap();
        assert_eq!(buf, apply_transform(Some(&lattice), &src));
    }

    #[test]
    fn test_invalid_config() {
        let src = gradient(4, 4, 3);
        let bad = ApplyConfig::default().rows_per_task(0);
        assert!(apply_transform_with(None, &src, &bad).is_err());
    }

    #[test]
    fn test_huge_rows_per_task() {
        let src = gradient(4, 4, 3);
        let lattice = Lattice::identity(2).unwrap();
        let config = ApplyConfig::default().rows_per_task(usize::MAX);
        assert!(config.validate().is_ok());

        let out = apply_transform_with(Some(&lattice), &src, &config).unwrap();
        let serial = apply_transform_with(Some(&lattice), &src, &ApplyConfig::serial()).unwrap();
        assert_eq!(out, serial);
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        let src = PixelBuffer::new(1, 1, 3, vec![1.5, -0.25, 0.5]).unwrap();
        let lattice = Lattice::identity(2).unwrap();
        let out = apply_transform(Some(&lattice), &src);
        assert_abs_diff_eq!(out.data()[0], 1.5, epsilon = 1e-5);
        assert_abs_diff_eq!(out.data()[1], -0.25, epsilon = 1e-5);
    }
}
