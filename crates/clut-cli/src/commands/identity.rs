//! Identity Hald CLUT generation

use crate::IdentityArgs;
use anyhow::{Context, Result};
use tracing::info;

pub fn run(args: IdentityArgs) -> Result<()> {
    let depth = super::bit_depth(args.bits)?;
    let image = clut_lut::identity_image(args.level)
        .with_context(|| format!("Cannot build level {} identity", args.level))?;

    super::save_image(&args.output, &image, depth)?;

    info!(
        level = args.level,
        side = image.width(),
        output = %args.output.display(),
        "Wrote identity Hald CLUT"
    );
    println!(
        "{}: level {} identity ({}x{}, {}^3 lattice)",
        args.output.display(),
        args.level,
        image.width(),
        image.height(),
        args.level * args.level
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_identity_oversized_level_errors() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("huge.png");
        let err = run(IdentityArgs {
            level: 2000,
            output: output.clone(),
            bits: 16,
        })
        .unwrap_err();

        assert!(format!("{err:#}").contains("exceeds the maximum of 1625"), "{err:#}");
        assert!(!output.exists());
    }
}
