//! Exhaustive O(n²) pair scan
//!
//! Baseline correctness reference: the spatial strategies must find exactly
//! the same overlap set on a static arrangement.

use crate::sim::detectors::{resolve_if_colliding, CollisionDetector};
use crate::sim::particle::Particle;

#[derive(Debug, Default)]
pub struct BruteForceDetector;

impl CollisionDetector for BruteForceDetector {
    fn detect_and_resolve(&mut self, particles: &mut [Particle]) {
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                resolve_if_colliding(particles, i, j);
            }
        }
    }
}
