//! Benchmarks for Hald CLUT loading and application.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use clut_core::PixelBuffer;
use clut_lut::{Lattice, hald};
use clut_ops::{ApplyConfig, apply_transform_with};

fn test_image(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, 4, |x, y, px| {
        px[0] = x as f32 / (width - 1) as f32;
        px[1] = y as f32 / (height - 1) as f32;
        px[2] = 0.5;
        px[3] = 1.0;
    })
    .expect("valid benchmark image")
}

/// Benchmark single-pixel lattice lookups.
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    let values: Vec<[f32; 3]> = (0..10000)
        .map(|i| {
            let t = i as f32 / 10000.0;
            [t, 1.0 - t, (t * 7.0).fract()]
        })
        .collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    for level in [4u32, 8, 12] {
        let lattice = Lattice::identity(level).expect("identity lattice");
        group.bench_with_input(BenchmarkId::new("trilinear", level), &values, |b, v| {
            b.iter(|| v.iter().map(|&rgb| lattice.sample(black_box(rgb))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Benchmark Hald image extraction.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for level in [4u32, 8] {
        let image = hald::identity_image(level).expect("identity image");
        group.throughput(Throughput::Elements(image.pixel_count() as u64));
        group.bench_with_input(BenchmarkId::new("hald", level), &image, |b, img| {
            b.iter(|| hald::load(black_box(img)))
        });
    }

    group.finish();
}

/// Benchmark whole-image application, serial vs parallel.
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.sample_size(20);

    let lattice = Lattice::identity(8).expect("identity lattice");
    for (w, h) in [(640u32, 360u32), (1920, 1080)] {
        let image = test_image(w, h);
        group.throughput(Throughput::Elements(image.pixel_count() as u64));

        for (name, config) in [
            ("serial", ApplyConfig::serial()),
            ("parallel", ApplyConfig::default()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, format!("{w}x{h}")), &image, |b, img| {
                b.iter(|| apply_transform_with(Some(&lattice), black_box(img), &config))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sample, bench_load, bench_apply);
criterion_main!(benches);
