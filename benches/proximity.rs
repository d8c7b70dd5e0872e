//! Benchmarks for the per-frame CPU work: the pairwise connection pass,
//! the stepper and software rendering.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use plexus::stepper::advance_all;
use plexus::{
    connections, render, spawn, BoundaryPolicy, FieldConfig, RasterSurface, RecordingSurface,
    Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 1920.0,
    height: 1080.0,
};

fn particles(count: usize) -> Vec<plexus::Particle> {
    let mut rng = SmallRng::seed_from_u64(42);
    spawn::create(count, VIEWPORT, &FieldConfig::ember(), &mut rng)
}

fn bench_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("connections");
    let style = FieldConfig::ember().connections;

    // O(n^2): watch how this grows past the usual 50-200 particles.
    for count in [50, 100, 200, 500, 1000] {
        let ps = particles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &ps, |b, ps| {
            b.iter(|| black_box(connections(ps, &style).count()))
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Reflect] {
        let mut ps = particles(1000);
        group.bench_function(format!("{:?}_1000", boundary), |b| {
            b.iter(|| advance_all(black_box(&mut ps), VIEWPORT, boundary))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = FieldConfig::ember();
    let ps = particles(100);

    group.bench_function("recording_100", |b| {
        let mut surface = RecordingSurface::new();
        b.iter(|| black_box(render(&ps, VIEWPORT, &config.connections, &mut surface)))
    });

    group.bench_function("raster_100", |b| {
        let mut surface = RasterSurface::new(1920, 1080, config.background);
        b.iter(|| black_box(render(&ps, VIEWPORT, &config.connections, &mut surface)))
    });

    group.finish();
}

criterion_group!(benches, bench_connections, bench_step, bench_render);
criterion_main!(benches);
