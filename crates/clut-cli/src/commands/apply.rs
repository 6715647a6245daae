//! Hald CLUT application command

use crate::ApplyArgs;
use anyhow::{Context, Result};
use clut_io::PngDecoder;
use clut_ops::{ApplyConfig, LatticeProvider, SlotProvider, apply_transform_with};
use tracing::{debug, info};

pub fn run(args: ApplyArgs, serial: bool) -> Result<()> {
    let depth = super::bit_depth(args.bits)?;
    let image = super::load_image(&args.input)?;

    let provider = SlotProvider::new(PngDecoder::new());
    if let Some(clut) = &args.clut {
        provider
            .select(&clut.to_string_lossy())
            .with_context(|| format!("Failed to load Hald CLUT: {}", clut.display()))?;
    }

    let mut config = ApplyConfig::default().rows_per_task(args.rows_per_task);
    if serial {
        config.parallel = false;
    }
    debug!(?config, "Apply configuration");

    let snapshot = provider.slot().snapshot();
    let lattice = snapshot.as_ref().map(|s| s.lattice().as_ref());
    if lattice.is_none() {
        info!("No Hald CLUT given, copying input");
    }

    let result = apply_transform_with(lattice, &image, &config)?;
    super::save_image(&args.output, &result, depth)?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "Applied Hald CLUT"
    );
    Ok(())
}
