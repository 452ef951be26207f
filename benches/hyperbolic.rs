//! Hyperboloid kernel benchmarks.
//!
//! Dimensions measured:
//! - CPU time for single point operations
//! - Disk tessellation cost vs segment count
//! - Whole-figure realignment and scene ticks
//! - Drift accumulated by long motion sequences

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hypsaucer::{
    AlignedEntity, Color, FigureConfig, FrameRecorder, HyperbolicDisk, HyperbolicPoint, Intents,
    PoincareDisk, Scene, SimulationConfig, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

fn random_point(rng: &mut StdRng, max_norm: f64) -> HyperbolicPoint {
    let r = rng.random::<f64>() * max_norm;
    let theta = rng.random::<f64>() * TAU;
    let heading = rng.random::<f64>() * TAU;
    HyperbolicPoint::from_plane(
        [r * theta.cos(), r * theta.sin()],
        Vec3::new(heading.cos(), heading.sin(), 0.0),
    )
    .expect("sampled inside the disk")
}

/// Benchmark the three point transforms.
fn bench_point_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("point");
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng, 0.9);
    let q = random_point(&mut rng, 0.9);

    group.bench_function("advance", |b| b.iter(|| black_box(&p).advance(black_box(0.02))));
    group.bench_function("rotate", |b| {
        b.iter(|| black_box(&p).rotated(black_box(0.05)))
    });
    group.bench_function("distance_and_direction", |b| {
        b.iter(|| black_box(&p).distance_and_direction(black_box(&q)))
    });
    group.bench_function("to_plane", |b| b.iter(|| black_box(&p).to_plane()));

    group.finish();
}

/// Compare hyperboloid distance against the disk formula on the same pairs.
fn bench_distance_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_models");
    let mut rng = StdRng::seed_from_u64(42);

    let n_points = 100;
    let points: Vec<HyperbolicPoint> = (0..n_points).map(|_| random_point(&mut rng, 0.9)).collect();
    let planar: Vec<[f64; 2]> = points.iter().map(HyperbolicPoint::to_plane).collect();

    group.throughput(Throughput::Elements((n_points * (n_points - 1) / 2) as u64));

    group.bench_function("hyperboloid_all_pairs", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..n_points {
                for j in (i + 1)..n_points {
                    sum += points[i].distance(&points[j]);
                }
            }
            sum
        })
    });

    group.bench_function("disk_all_pairs", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..n_points {
                for j in (i + 1)..n_points {
                    sum += PoincareDisk::distance(planar[i], planar[j]);
                }
            }
            sum
        })
    });

    group.finish();
}

/// Benchmark disk tessellation.
fn bench_disk_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("disk_recompute");
    let mut rng = StdRng::seed_from_u64(42);
    let center = random_point(&mut rng, 0.5);

    for segments in [8, 32, 100, 256, 1024] {
        let mut disk = HyperbolicDisk::with_segments(0.2, center, Color::RED, segments)
            .expect("valid disk");

        group.throughput(Throughput::Elements(segments as u64));

        group.bench_with_input(BenchmarkId::new("segments", segments), &segments, |b, _| {
            b.iter(|| {
                disk.recompute();
                black_box(disk.vertices().len())
            })
        });
    }

    group.finish();
}

/// Benchmark placing eyes, pupils and mouth around one body.
fn bench_realign(c: &mut Criterion) {
    let mut group = c.benchmark_group("realign");
    let figure = FigureConfig::default();

    for segments in [16, 100] {
        let mut entity = AlignedEntity::new(&figure, Color::RED, Color::WHITE, segments)
            .expect("valid figure");
        let peer = HyperbolicPoint::origin().advance_rotated(1.0, -1.2);

        group.bench_with_input(BenchmarkId::new("segments", segments), &segments, |b, _| {
            b.iter(|| entity.realign(black_box(&peer)))
        });
    }

    group.finish();
}

/// Benchmark a full tick plus frame of the default scene.
fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    group.sample_size(50);

    let mut scene = Scene::new(SimulationConfig::default()).expect("default config");
    let mut recorder = FrameRecorder::new();
    let intents = Intents {
        move_forward: true,
        rotate_left: true,
        ..Intents::none()
    };

    group.bench_function("tick", |b| b.iter(|| scene.tick(black_box(intents))));
    group.bench_function("frame", |b| {
        b.iter(|| {
            recorder.clear();
            scene.frame(&mut recorder)
        })
    });

    group.finish();
}

/// Measure invariant drift vs number of steps.
fn bench_drift_vs_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("drift_vs_steps");
    group.sample_size(10);

    eprintln!("\n=== Drift vs Steps (turn 0.05, step 0.02) ===");
    eprintln!("{:>10} {:>15} {:>15}", "steps", "max_residual", "from_origin");

    for steps in [100, 1_000, 10_000, 100_000] {
        let mut p = HyperbolicPoint::origin().advance(1.0);
        for _ in 0..steps {
            p.rotate(-0.05);
            p = p.advance(0.02);
        }
        let origin = HyperbolicPoint::origin();
        eprintln!(
            "{:>10} {:>15.2e} {:>15.6}",
            steps,
            p.residuals().max(),
            p.distance(&origin)
        );

        group.bench_with_input(BenchmarkId::new("steps", steps), &steps, |b, &steps| {
            b.iter(|| {
                let mut p = HyperbolicPoint::origin();
                for _ in 0..steps.min(1_000) {
                    p.rotate(-0.05);
                    p = p.advance(0.02);
                }
                p
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_point_ops,
    bench_distance_models,
    bench_disk_recompute,
    bench_realign,
    bench_scene,
    bench_drift_vs_steps,
);
criterion_main!(benches);
