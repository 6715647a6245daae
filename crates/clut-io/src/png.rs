//! PNG format support.
//!
//! Reads 8- and 16-bit PNG files into normalised `f32` buffers and writes
//! them back. Palette and sub-byte images are expanded on read; grayscale
//! is replicated to RGB so every decoded buffer can feed a color lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use clut_io::png::{read, write};
//! use clut_io::BitDepth;
//!
//! let image = read("input.png")?;
//! write("output.png", &image, BitDepth::Sixteen)?;
//! ```

use crate::{IoError, IoResult};
use clut_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, trace};

/// Sample depth for written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// 8 bits per sample.
    #[default]
    Eight,
    /// 16 bits per sample.
    Sixteen,
}

impl BitDepth {
    /// Parses `8` or `16`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(Self::Eight),
            16 => Some(Self::Sixteen),
            _ => None,
        }
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "png::read");

    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::Decode(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let samples: Vec<f32> = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&v| v as f32 / 255.0).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f32 / 65535.0)
            .collect(),
        depth => {
            return Err(IoError::Unsupported(format!("bit depth {depth:?}")));
        }
    };

    let (channels, data) = match info.color_type {
        png::ColorType::Rgb => (3, samples),
        png::ColorType::Rgba => (4, samples),
        png::ColorType::Grayscale => {
            (3, samples.iter().flat_map(|&g| [g, g, g]).collect())
        }
        png::ColorType::GrayscaleAlpha => (
            4,
            samples
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
        ),
        other => {
            return Err(IoError::Unsupported(format!("color type {other:?}")));
        }
    };

    debug!(
        path = %path.display(),
        width = info.width,
        height = info.height,
        channels,
        "Decoded PNG"
    );
    Ok(PixelBuffer::new(info.width, info.height, channels, data)?)
}

/// Writes a 3- or 4-channel buffer to a PNG file.
///
/// Samples are clamped to `[0, 1]` and rounded to the target depth.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, depth: BitDepth) -> IoResult<()> {
    let path = path.as_ref();

    let color_type = match image.channels() {
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(IoError::Unsupported(format!("{n} channels for PNG output"))),
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_compression(png::Compression::default());

    let bytes: Vec<u8> = match depth {
        BitDepth::Eight => {
            encoder.set_depth(png::BitDepth::Eight);
            image.data().iter().map(|&v| quantize(v, 255.0) as u8).collect()
        }
        BitDepth::Sixteen => {
            encoder.set_depth(png::BitDepth::Sixteen);
            image
                .data()
                .iter()
                .flat_map(|&v| (quantize(v, 65535.0) as u16).to_be_bytes())
                .collect()
        }
    };

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::Encode(e.to_string()))?;

    debug!(path = %path.display(), ?depth, "Wrote PNG");
    Ok(())
}

#[inline]
fn quantize(v: f32, max: f32) -> f32 {
    (v.clamp(0.0, 1.0) * max).round()
}
