//! Hald CLUT validation report

use crate::InfoArgs;
use anyhow::{Result, bail};
use clut_lut::{ValidationError, hald};
use tracing::debug;

pub fn run(args: InfoArgs) -> Result<()> {
    let mut invalid = 0usize;

    for path in &args.input {
        let image = super::load_image(path)?;
        debug!(path = %path.display(), "Checking Hald CLUT");

        match hald::load(&image) {
            Ok(lattice) => println!(
                "{}: {}x{}, level {}, {}^3 lattice ({} samples)",
                path.display(),
                image.width(),
                image.height(),
                lattice.level(),
                lattice.size(),
                lattice.entry_count()
            ),
            Err(e) => {
                invalid += 1;
                println!("{}: not a Hald CLUT: {}", path.display(), describe(&e));
            }
        }
    }

    if invalid > 0 {
        bail!("{} of {} image(s) are not valid Hald CLUTs", invalid, args.input.len());
    }
    Ok(())
}

fn describe(err: &ValidationError) -> String {
    match err {
        ValidationError::NotPerfectCube { side } => {
            let below = hald::floor_cube_root(*side);
            match (below + 1).checked_pow(3) {
                Some(above_side) => format!(
                    "{} (nearest levels: {} -> {}px, {} -> {}px)",
                    err,
                    below,
                    below.pow(3),
                    below + 1,
                    above_side
                ),
                None => format!("{} (nearest level: {} -> {}px)", err, below, below.pow(3)),
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_nearest_levels() {
        let msg = describe(&ValidationError::NotPerfectCube { side: 100 });
        assert!(msg.ends_with("(nearest levels: 4 -> 64px, 5 -> 125px)"), "{msg}");

        let msg = describe(&ValidationError::NotPerfectCube { side: 728 });
        assert!(msg.contains("8 -> 512px, 9 -> 729px"), "{msg}");
    }

    #[test]
    fn test_describe_near_u32_max() {
        let msg = describe(&ValidationError::NotPerfectCube { side: u32::MAX });
        assert!(msg.ends_with("(nearest level: 1625 -> 4291015625px)"), "{msg}");
    }

    #[test]
    fn test_describe_other_errors() {
        let err = ValidationError::NotSquare { width: 100, height: 50 };
        assert_eq!(describe(&err), err.to_string());
    }
}
