//! Detection strategy benchmarks
//!
//! Compares the three collision detection strategies at various particle
//! counts to verify their asymptotic behavior.
//!
//! Run with: cargo bench --bench detectors

use collision_sim::sim::detectors::{
    BruteForceDetector, CollisionDetector, QuadTreeDetector, SpatialHashDetector,
};
use collision_sim::sim::particle::Particle;
use collision_sim::util::vec2::Vec2;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

const ARENA_WIDTH: f64 = 1280.0;
const ARENA_HEIGHT: f64 = 720.0;

/// Create a particle field randomly distributed across the arena
fn create_particles(count: usize) -> Vec<Particle> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|_| {
            let mass = rng.gen_range(0.05..0.5);
            let position = Vec2::new(
                rng.gen_range(20.0..ARENA_WIDTH - 20.0),
                rng.gen_range(20.0..ARENA_HEIGHT - 20.0),
            );
            let velocity = Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            Particle::new(position, velocity, mass)
        })
        .collect()
}

fn bench_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_and_resolve");
    group.sample_size(50);

    for count in [100, 250, 500, 1000] {
        let particles = create_particles(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("brute_force", count),
            &particles,
            |b, particles| {
                let mut detector = BruteForceDetector;
                b.iter(|| {
                    let mut field = particles.clone();
                    detector.detect_and_resolve(black_box(&mut field));
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("spatial_hash", count),
            &particles,
            |b, particles| {
                let mut detector = SpatialHashDetector::new(40.0);
                b.iter(|| {
                    let mut field = particles.clone();
                    detector.detect_and_resolve(black_box(&mut field));
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("quadtree", count),
            &particles,
            |b, particles| {
                let mut detector = QuadTreeDetector::new();
                b.iter(|| {
                    let mut field = particles.clone();
                    detector.detect_and_resolve(black_box(&mut field));
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_detectors);
criterion_main!(benches);
