//! CLI command implementations

pub mod apply;
pub mod identity;
pub mod info;

use anyhow::{Context, Result, bail};
use clut_core::PixelBuffer;
use clut_io::BitDepth;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    clut_io::png::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelBuffer, depth: BitDepth) -> Result<()> {
    clut_io::png::write(path, image, depth)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse a `--bits` value
pub fn bit_depth(bits: u8) -> Result<BitDepth> {
    match BitDepth::from_bits(bits) {
        Some(depth) => Ok(depth),
        None => bail!("Unsupported bit depth: {} (use 8 or 16)", bits),
    }
}
