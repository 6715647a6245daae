//! Integration tests for the CLUT crates.
//!
//! End-to-end checks across decoding, lattice extraction, the provider and
//! the buffer transform.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use clut_core::{PixelBuffer, SourceImage};
    use clut_io::{BitDepth, PngDecoder};
    use clut_lut::{Lattice, ValidationError, hald};
    use clut_ops::{
        ApplyConfig, LatticeProvider, LatticeSlot, SlotProvider, apply_transform,
        apply_transform_with,
    };
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Test image with a spread of colors and an alpha channel.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, 4, |x, y, px| {
            px[0] = x as f32 / (width - 1) as f32;
            px[1] = y as f32 / (height - 1) as f32;
            px[2] = ((x * 7 + y * 3) % 32) as f32 / 31.0;
            px[3] = 0.75;
        })
        .unwrap()
    }

    /// Hald image holding a non-linear grade: warm tint and a gamma.
    fn graded_hald(level: u32) -> SourceImage {
        let id = Lattice::identity(level).unwrap();
        let data = id
            .data()
            .iter()
            .map(|&[r, g, b]| [r.powf(0.8), g, b * 0.9])
            .collect();
        Lattice::from_data(level, data).unwrap().to_image().unwrap()
    }

    #[test]
    fn test_identity_law() {
        for level in [2, 3, 4] {
            let lattice = hald::load(&hald::identity_image(level).unwrap()).unwrap();
            let src = test_image(41, 29);
            let out = apply_transform(Some(&lattice), &src);
            for (a, b) in src.data().iter().zip(out.data()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_validation_boundary() {
        for (side, level) in [(8, 2), (64, 4), (729, 9)] {
            let image = SourceImage::zeros(side, side, 3).unwrap();
            assert!(hald::validate(&image));
            assert_eq!(hald::load(&image).unwrap().level(), level);
        }

        let one = SourceImage::zeros(1, 1, 3).unwrap();
        assert!(hald::validate(&one));
        assert!(matches!(
            hald::load(&one),
            Err(ValidationError::DegenerateLattice { .. })
        ));

        for side in [10, 100] {
            let image = SourceImage::zeros(side, side, 3).unwrap();
            assert_eq!(
                hald::load(&image).unwrap_err(),
                ValidationError::NotPerfectCube { side }
            );
        }

        let wide = SourceImage::zeros(100, 50, 3).unwrap();
        assert_eq!(
            hald::load(&wide).unwrap_err(),
            ValidationError::NotSquare { width: 100, height: 50 }
        );
    }

    #[test]
    fn test_clamp_correctness() {
        let lattice = hald::load(&graded_hald(2)).unwrap();
        assert_eq!(lattice.size(), 4);

        let (idx, frac) = lattice.locate([1.0, 1.0, 1.0]);
        assert_eq!(idx, [2, 2, 2]);
        assert_eq!(frac, [1.0, 1.0, 1.0]);

        let out = lattice.sample([1.0, 0.0, 0.0]);
        let p2 = lattice.get(2, 0, 0);
        let p3 = lattice.get(3, 0, 0);
        assert!(out[0] >= p2[0].min(p3[0]) && out[0] <= p2[0].max(p3[0]));
    }

    #[test]
    fn test_node_exactness() {
        for level in [2, 3] {
            let lattice = hald::load(&graded_hald(level)).unwrap();
            let n = (lattice.size() - 1) as f32;
            for i in 0..lattice.size() {
                let v = i as f32 / n;
                assert_eq!(lattice.sample([v, v, v]), lattice.get(i, i, i), "level {level} node {i}");
            }
        }
    }

    #[test]
    fn test_worked_example() {
        let lattice = hald::load(&graded_hald(2)).unwrap();
        let mut mean = [0.0f32; 3];
        for b in 1..=2 {
            for g in 1..=2 {
                for r in 1..=2 {
                    let c = lattice.get(r, g, b);
                    for i in 0..3 {
                        mean[i] += c[i] * 0.125;
                    }
                }
            }
        }
        let out = lattice.sample([0.5, 0.5, 0.5]);
        for i in 0..3 {
            assert_abs_diff_eq!(out[i], mean[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_determinism_across_workers() {
        let lattice = hald::load(&graded_hald(3)).unwrap();
        let src = test_image(257, 131);

        let reference = apply_transform_with(Some(&lattice), &src, &ApplyConfig::serial()).unwrap();
        for threads in [1, 2, 3, 8] {
            for rows in [1, 5, 64] {
                let config = ApplyConfig::default().threads(threads).rows_per_task(rows);
                let out = apply_transform_with(Some(&lattice), &src, &config).unwrap();
                let same = reference
                    .data()
                    .iter()
                    .zip(out.data())
                    .all(|(a, b)| a.to_bits() == b.to_bits());
                assert!(same, "threads {threads}, rows {rows}");
            }
        }
    }

    #[test]
    fn test_alpha_pass_through() {
        let lattice = hald::load(&graded_hald(2)).unwrap();
        let src = test_image(16, 16);
        let out = apply_transform(Some(&lattice), &src);
        assert!(out.pixels().all(|px| px[3] == 0.75));
    }

    #[test]
    fn test_png_hald_pipeline() {
        let dir = tempdir().unwrap();
        clut_io::png::write(dir.path().join("id8.png"), &hald::identity_image(2).unwrap(), BitDepth::Eight)
            .unwrap();
        clut_io::png::write(dir.path().join("grade.png"), &graded_hald(4), BitDepth::Sixteen).unwrap();

        let slot = Arc::new(LatticeSlot::new());
        let provider = SlotProvider::with_slot(PngDecoder::with_root(dir.path()), Arc::clone(&slot));
        let src = test_image(32, 32);

        // 8-bit identity: within quantisation of the nodes
        provider.select("id8.png").unwrap();
        let out = slot.apply(&src);
        for (a, b) in src.data().iter().zip(out.data()) {
            assert_abs_diff_eq!(a, b, epsilon = 0.5 / 255.0 + 1e-5);
        }

        // graded: red lifted by the gamma, blue scaled down
        provider.select("grade.png").unwrap();
        let out = slot.apply(&src);
        let px_in = src.pixel(16, 8);
        let px_out = out.pixel(16, 8);
        assert!(px_out[0] > px_in[0]);
        assert_abs_diff_eq!(px_out[1], px_in[1], epsilon = 1e-3);
        assert_abs_diff_eq!(px_out[2], px_in[2] * 0.9, epsilon = 1e-3);

        // broken source keeps the grade active
        assert!(provider.select("id8.png.missing").is_err());
        assert_eq!(slot.snapshot().unwrap().source_id(), "grade.png");

        provider.clear();
        assert_eq!(slot.apply(&src), src);
    }
}
