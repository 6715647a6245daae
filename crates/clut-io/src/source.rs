//! File-backed Hald CLUT sources.

use crate::{png, IoError};
use clut_core::SourceImage;
use clut_ops::SourceDecoder;
use std::path::{Path, PathBuf};

/// Decodes Hald CLUT sources from PNG files.
///
/// Source identifiers are file paths, resolved against an optional root
/// directory.
///
/// ```rust,no_run
/// use clut_io::PngDecoder;
/// use clut_ops::{LatticeProvider, SlotProvider};
///
/// let provider = SlotProvider::new(PngDecoder::with_root("/srv/luts"));
/// provider.select("film/kodak_portra.png")?;
/// # Ok::<(), clut_lut::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PngDecoder {
    root: Option<PathBuf>,
}

impl PngDecoder {
    /// Decoder resolving identifiers as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder resolving relative identifiers under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Path a source identifier refers to.
    pub fn resolve(&self, source_id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(source_id),
            None => Path::new(source_id).to_path_buf(),
        }
    }
}

impl SourceDecoder for PngDecoder {
    type Error = IoError;

    fn decode(&self, source_id: &str) -> Result<SourceImage, IoError> {
        png::read(self.resolve(source_id))
    }
}
