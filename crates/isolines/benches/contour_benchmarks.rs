//! Benchmarks for isoline extraction.
//!
//! Run with: cargo bench --package isolines --bench contour_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isoline_common::{BoundingBox, Color, GridData, GridMapping, LinearGradient};
use isolines::{march_squares, IsolineGenerator, LineStitcher};
use rand::Rng;
use test_utils::{create_linear_grid, create_plume_grid, create_wave_grid};

fn unit_bbox() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 1.0, 1.0)
}

/// Smooth field with hills and valleys.
fn smooth_field(size: usize) -> GridData {
    GridData::new(size, size, create_wave_grid(size, size)).unwrap()
}

/// Smooth field plus random noise (many more short contours).
fn noisy_field(size: usize) -> GridData {
    let mut rng = rand::thread_rng();
    let values = create_wave_grid(size, size)
        .into_iter()
        .map(|v| v + rng.gen_range(-5.0..5.0))
        .collect();
    GridData::new(size, size, values).unwrap()
}

// =============================================================================
// MARCHING SQUARES BENCHMARKS
// =============================================================================

fn bench_march_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("march_squares");

    for size in [64, 128, 256, 512] {
        let mapping = GridMapping::new(unit_bbox(), size, size).unwrap();
        let smooth = smooth_field(size);
        let noisy = noisy_field(size);

        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(
            BenchmarkId::new("smooth_single_level", format!("{}x{}", size, size)),
            &smooth,
            |b, grid| {
                b.iter(|| march_squares(black_box(grid), &mapping, black_box(50.0)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy_single_level", format!("{}x{}", size, size)),
            &noisy,
            |b, grid| {
                b.iter(|| march_squares(black_box(grid), &mapping, black_box(50.0)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// STITCHING BENCHMARKS
// =============================================================================

fn bench_stitch_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch_segments");

    for size in [128, 256, 512] {
        let mapping = GridMapping::new(unit_bbox(), size, size).unwrap();
        let segments = march_squares(&noisy_field(size), &mapping, 50.0);

        group.throughput(Throughput::Elements(segments.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("noisy", format!("{}x{}", size, size)),
            &segments,
            |b, segments| {
                b.iter(|| {
                    let mut stitcher = LineStitcher::new(1e-9 / size as f64);
                    for s in segments {
                        stitcher.add_segment(*s);
                    }
                    black_box(stitcher.finish())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// FULL SWEEP BENCHMARKS
// =============================================================================

fn bench_generate_isoline(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_isoline");
    let generator = IsolineGenerator::new(unit_bbox()).unwrap();

    let fields = [
        ("linear", GridData::new(256, 256, create_linear_grid(256, 256, 100.0)).unwrap()),
        (
            "plume",
            GridData::new(256, 256, create_plume_grid(256, 256, 100.0, 140.0, 40.0, 100.0))
                .unwrap(),
        ),
        ("waves", smooth_field(256)),
        ("noisy", noisy_field(256)),
    ];

    for (name, grid) in &fields {
        group.bench_with_input(BenchmarkId::new("field", name), grid, |b, grid| {
            b.iter(|| generator.generate_isoline(black_box(grid), 50.0, Color::BLACK));
        });
    }

    group.finish();
}

fn bench_generate_isolines(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_isolines");
    let generator = IsolineGenerator::new(unit_bbox()).unwrap();
    let grid = smooth_field(512);
    let gradient = LinearGradient::blue_red(0.0, 100.0).unwrap();

    for levels in [1, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::new("levels", levels), &levels, |b, &levels| {
            b.iter(|| generator.generate_isolines(black_box(&grid), levels, &gradient));
        });
    }

    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");
    let generator = IsolineGenerator::new(unit_bbox()).unwrap();
    let isoline = generator
        .generate_isoline(&smooth_field(256), 50.0, Color::BLACK)
        .unwrap();

    for passes in [1u32, 2, 4] {
        group.bench_with_input(BenchmarkId::new("passes", passes), &passes, |b, &passes| {
            b.iter(|| black_box(&isoline).smoothed(passes));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_march_squares,
    bench_stitch_segments,
    bench_generate_isoline,
    bench_generate_isolines,
    bench_smoothing,
);
criterion_main!(benches);
