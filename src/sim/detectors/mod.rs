//! Interchangeable collision detection strategies
//!
//! Every detector satisfies the same contract: given the particle slice,
//! find each unordered overlapping pair (i, j) with i < j and resolve it
//! once, mutating positions and velocities in place. Detection and
//! resolution interleave within a pass, so results are deterministic only
//! up to the detector's own traversal order; the brute-force reference has
//! the same property.

pub mod brute_force;
pub mod quadtree;
pub mod spatial_hash;

pub use brute_force::BruteForceDetector;
pub use quadtree::QuadTreeDetector;
pub use spatial_hash::SpatialHashDetector;

use crate::sim::particle::Particle;

/// Strategy interface for per-step overlap detection and resolution.
///
/// Takes `&mut self` so implementations can reuse their index-structure
/// allocations between calls; no logical state persists across frames.
pub trait CollisionDetector {
    fn detect_and_resolve(&mut self, particles: &mut [Particle]);
}

/// Overlap-test and resolve one candidate pair. Requires i < j.
///
/// Shared by all strategies so the physics response is identical no matter
/// which index structure found the pair.
#[inline]
pub(crate) fn resolve_if_colliding(particles: &mut [Particle], i: usize, j: usize) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];
    if a.is_colliding(b) {
        a.resolve_collision(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::vec2::Vec2;

    const EPSILON: f64 = 1e-9;

    fn particle(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), mass)
    }

    /// Arrangement with several disjoint overlapping pairs plus isolated
    /// particles. Resolution of disjoint pairs is order-independent, so
    /// every detector must produce the same end state.
    fn disjoint_pairs_arrangement() -> Vec<Particle> {
        vec![
            // pair 1, head on
            particle(0.0, 0.0, 50.0, 0.0, 1.0),
            particle(30.0, 0.0, -50.0, 0.0, 1.0),
            // pair 2, unequal masses, diagonal approach
            particle(300.0, 300.0, 20.0, 20.0, 2.0),
            particle(330.0, 320.0, -10.0, -40.0, 0.5),
            // pair 3, one member stationary
            particle(700.0, 100.0, 0.0, 0.0, 1.5),
            particle(725.0, 100.0, -60.0, 5.0, 1.0),
            // isolated
            particle(1000.0, 1000.0, 42.0, -17.0, 1.0),
            particle(100.0, 900.0, 0.0, 0.0, 4.0),
        ]
    }

    fn assert_same_end_state(a: &[Particle], b: &[Particle]) {
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert!(
                pa.position.approx_eq(pb.position, EPSILON),
                "positions diverged: {:?} vs {:?}",
                pa.position,
                pb.position
            );
            assert!(
                pa.velocity.approx_eq(pb.velocity, EPSILON),
                "velocities diverged: {:?} vs {:?}",
                pa.velocity,
                pb.velocity
            );
        }
    }

    #[test]
    fn test_oracle_equivalence_on_disjoint_pairs() {
        let mut brute = disjoint_pairs_arrangement();
        let mut hashed = brute.clone();
        let mut treed = brute.clone();

        BruteForceDetector.detect_and_resolve(&mut brute);
        // Cell size at 2x the largest radius in the field (40)
        SpatialHashDetector::new(80.0).detect_and_resolve(&mut hashed);
        QuadTreeDetector::new().detect_and_resolve(&mut treed);

        assert_same_end_state(&brute, &hashed);
        assert_same_end_state(&brute, &treed);
    }

    #[test]
    fn test_three_particle_scenario() {
        // Particles 0 and 1 overlap (radii 20, centers 30 apart), particle 2
        // is isolated. All detectors must resolve pair (0, 1) identically
        // and leave 2 untouched.
        let arrangement = vec![
            particle(0.0, 0.0, 0.0, 0.0, 1.0),
            particle(30.0, 0.0, 0.0, 0.0, 1.0),
            particle(1000.0, 1000.0, 0.0, 0.0, 1.0),
        ];

        let mut brute = arrangement.clone();
        BruteForceDetector.detect_and_resolve(&mut brute);

        // The overlapping pair separated symmetrically
        assert!(brute[0].position.approx_eq(Vec2::new(-5.0, 0.0), EPSILON));
        assert!(brute[1].position.approx_eq(Vec2::new(35.0, 0.0), EPSILON));
        // The isolated particle is untouched
        assert_eq!(brute[2].position, Vec2::new(1000.0, 1000.0));
        assert_eq!(brute[2].velocity, Vec2::ZERO);

        let mut hashed = arrangement.clone();
        SpatialHashDetector::new(80.0).detect_and_resolve(&mut hashed);
        assert_same_end_state(&brute, &hashed);

        let mut treed = arrangement;
        QuadTreeDetector::new().detect_and_resolve(&mut treed);
        assert_same_end_state(&brute, &treed);
    }

    #[test]
    fn test_no_overlaps_is_noop_for_all_detectors() {
        // Spread well apart so no pair overlaps
        let arrangement: Vec<Particle> = (0..20)
            .map(|i| {
                let col = (i % 5) as f64;
                let row = (i / 5) as f64;
                particle(col * 200.0, row * 200.0, 10.0, -10.0, 1.0)
            })
            .collect();

        let run = |detector: &mut dyn CollisionDetector| {
            let mut particles = arrangement.clone();
            detector.detect_and_resolve(&mut particles);
            for (before, after) in arrangement.iter().zip(particles.iter()) {
                assert_eq!(before.position, after.position);
                assert_eq!(before.velocity, after.velocity);
            }
        };

        run(&mut BruteForceDetector);
        run(&mut SpatialHashDetector::new(80.0));
        run(&mut QuadTreeDetector::new());
    }

    #[test]
    fn test_detectors_agree_on_random_pair_field() {
        // Pairs of small particles scattered on a coarse lattice. Members of
        // a pair sit within 30 units of each other and may overlap; pairs on
        // different lattice sites are 240+ units apart (radii stay below 9),
        // so overlapping pairs are disjoint and end states must agree for
        // any traversal order.
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let mut arrangement = Vec::new();
        for site in 0..60 {
            let base = Vec2::new(
                (site % 10) as f64 * 300.0 + 100.0,
                (site / 10) as f64 * 300.0 + 100.0,
            );
            for _ in 0..2 {
                let offset = Vec2::new(rng.gen_range(-15.0..15.0), rng.gen_range(-15.0..15.0));
                let p = base + offset;
                arrangement.push(particle(
                    p.x,
                    p.y,
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(0.05..0.2),
                ));
            }
        }

        let mut brute = arrangement.clone();
        let mut hashed = arrangement.clone();
        let mut treed = arrangement;

        BruteForceDetector.detect_and_resolve(&mut brute);
        SpatialHashDetector::new(40.0).detect_and_resolve(&mut hashed);
        QuadTreeDetector::new().detect_and_resolve(&mut treed);

        assert_same_end_state(&brute, &hashed);
        assert_same_end_state(&brute, &treed);
    }

    #[test]
    fn test_resolve_if_colliding_skips_separated_pair() {
        let mut particles = vec![
            particle(0.0, 0.0, 10.0, 0.0, 1.0),
            particle(500.0, 0.0, -10.0, 0.0, 1.0),
        ];
        resolve_if_colliding(&mut particles, 0, 1);
        assert_eq!(particles[0].position, Vec2::ZERO);
        assert_eq!(particles[1].position, Vec2::new(500.0, 0.0));
    }
}
