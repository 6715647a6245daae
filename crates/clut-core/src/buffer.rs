//! Flat pixel buffers.
//!
//! [`PixelBuffer`] is the only image container the CLUT crates exchange.
//! It stores `f32` samples in **row-major** order, top-to-bottom, with
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! Only the first three channels take part in a color lookup; any further
//! channels (alpha, masks) travel along untouched.
//!
//! # Usage
//!
//! ```rust
//! use clut_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::zeros(4, 2, 4).unwrap();
//! img.pixel_mut(1, 1).copy_from_slice(&[1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(img.pixel(1, 1)[1], 0.5);
//! assert_eq!(img.rows().count(), 2);
//! ```

use crate::{Error, Result};

/// Minimum channel count for a buffer that can go through a color lookup.
pub const MIN_CHANNELS: u32 = 3;

/// A decoded Hald CLUT source image.
///
/// Produced by an external decoder and only read by the lattice loader.
pub type SourceImage = PixelBuffer;

/// Owned `f32` image with interleaved channels.
///
/// The invariants `width > 0`, `height > 0`, `channels >= 3` and
/// `data.len() == width * height * channels` are checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Wraps existing sample data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for zero or overflowing sizes
    /// - [`Error::ChannelMismatch`] for fewer than three channels
    /// - [`Error::BufferSizeMismatch`] if `data` has the wrong length
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        let expected = Self::sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates a buffer filled with zeros.
    pub fn zeros(width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = Self::sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        })
    }

    /// Builds a buffer by evaluating `f(x, y, pixel)` for every pixel.
    ///
    /// `pixel` is zero-initialised and has `channels` elements.
    ///
    /// ```rust
    /// use clut_core::PixelBuffer;
    ///
    /// let ramp = PixelBuffer::from_fn(3, 1, 3, |x, _, px| px.fill(x as f32 / 2.0)).unwrap();
    /// assert_eq!(ramp.pixel(2, 0), &[1.0, 1.0, 1.0]);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, channels: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, &mut [f32]),
    {
        let mut buf = Self::zeros(width, height, channels)?;
        let ch = channels as usize;
        let w = width as usize;
        for (i, px) in buf.data.chunks_exact_mut(ch).enumerate() {
            f((i % w) as u32, (i / w) as u32, px);
        }
        Ok(buf)
    }

    fn sample_count(width: u32, height: u32, channels: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero size"));
        }
        if channels < MIN_CHANNELS {
            return Err(Error::channel_mismatch(MIN_CHANNELS, channels));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels as usize))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflows usize"))
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// `true` when width equals height.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// All samples, row-major.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to all samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Returns the channels of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels as usize]
    }

    /// Mutable channels of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let start = self.offset(x, y);
        let ch = self.channels as usize;
        &mut self.data[start..start + ch]
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for image {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Iterates over pixels in scan order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.channels as usize)
    }

    /// Iterates over rows.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.row_len())
    }

    /// Iterates mutably over rows.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let len = self.row_len();
        self.data.chunks_exact_mut(len)
    }
}
