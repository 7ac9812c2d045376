//! Simulation orchestrator
//!
//! Owns the particle collection, the active detection strategy, and a
//! render-shape cache kept index-aligned with the particles. One `update`
//! integrates every particle, runs a single detector pass, and re-syncs the
//! cache. Population changes mutate particles and shapes together so the
//! lockstep invariant (equal length, matching order) always holds.

use std::f64::consts::PI;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sim::constants::{mass_to_radius, particle::RADIUS_SCALE, spawn};
use crate::sim::detectors::{BruteForceDetector, CollisionDetector};
use crate::sim::particle::Particle;
use crate::util::vec2::Vec2;

/// Drawable circle derived from a particle; color assignment is the
/// renderer's concern
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderShape {
    pub position: Vec2,
    pub radius: f64,
}

pub struct Simulation {
    bounds_width: f64,
    bounds_height: f64,
    particles: Vec<Particle>,
    /// Index-aligned with `particles`; insertion and removal touch both
    shapes: Vec<RenderShape>,
    detector: Box<dyn CollisionDetector>,
    algo_name: String,
}

impl Simulation {
    pub fn new(bounds_width: f64, bounds_height: f64) -> Self {
        Self {
            bounds_width,
            bounds_height,
            particles: Vec::new(),
            shapes: Vec::new(),
            detector: Box::new(BruteForceDetector),
            algo_name: "Brute Force".to_string(),
        }
    }

    /// Hot-swap the detection strategy; takes effect from the next update.
    /// Detectors hold no logical state across calls, so no draining is
    /// needed.
    pub fn set_detector(&mut self, detector: Box<dyn CollisionDetector>, name: impl Into<String>) {
        self.detector = detector;
        self.algo_name = name.into();
        debug!(algorithm = %self.algo_name, "detector swapped");
    }

    pub fn current_algorithm_name(&self) -> &str {
        &self.algo_name
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shapes(&self) -> &[RenderShape] {
        &self.shapes
    }

    /// Replace the population with `count` freshly generated particles
    pub fn generate_particles(&mut self, count: usize) {
        self.particles = self.generate_particles_internal(count);
        self.shapes = build_shapes(&self.particles);
        debug!(count, "population generated");
    }

    /// Append `count` particles generated the same way as the initial
    /// population
    pub fn add_particles(&mut self, count: usize) {
        let new_particles = self.generate_particles_internal(count);
        self.shapes.extend(build_shapes(&new_particles));
        self.particles.extend(new_particles);
        debug!(count, total = self.particles.len(), "particles added");
    }

    /// Remove the `count` oldest particles, ties broken by original index.
    /// The count is clamped to the population size. Erasure walks indices
    /// in descending order so the shape cache stays aligned during
    /// in-place removal.
    pub fn remove_oldest(&mut self, count: usize) {
        let remove_count = count.min(self.particles.len());
        if remove_count == 0 {
            return;
        }

        let mut time_idx: Vec<(Instant, usize)> = self
            .particles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.created_at(), i))
            .collect();
        time_idx.sort();

        let mut indices: Vec<usize> = time_idx[..remove_count].iter().map(|&(_, i)| i).collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for idx in indices {
            self.particles.remove(idx);
            self.shapes.remove(idx);
        }
        debug!(
            removed = remove_count,
            total = self.particles.len(),
            "oldest particles removed"
        );
    }

    /// Advance one step: integrate and reflect every particle, run the
    /// active detector, then sync shape positions.
    ///
    /// `dt` is trusted as-is; callers clamp it (see `constants::tick::MAX_DT`)
    /// to bound integration error on frame hitches.
    pub fn update(&mut self, dt: f64) {
        for particle in &mut self.particles {
            particle.update(dt, self.bounds_width, self.bounds_height);
        }

        self.detector.detect_and_resolve(&mut self.particles);

        for (shape, particle) in self.shapes.iter_mut().zip(self.particles.iter()) {
            shape.position = particle.position;
        }
    }

    /// Generate particles with randomized mass, position, and velocity.
    ///
    /// The mass range derives from an area budget: the drawn circles may
    /// cover at most `MAX_AREA_COVERAGE` of the arena in total, so the
    /// per-particle average area shrinks as the requested count grows.
    fn generate_particles_internal(&self, count: usize) -> Vec<Particle> {
        let mut rng = rand::thread_rng();
        let mut particles = Vec::with_capacity(count);
        if count == 0 {
            return particles;
        }

        let arena_area = self.bounds_width * self.bounds_height;
        let max_total_area = arena_area * spawn::MAX_AREA_COVERAGE;
        let average_area = max_total_area / count as f64;
        let average_radius = (average_area / PI).sqrt();

        let mut max_mass = (average_radius / RADIUS_SCALE).powi(2);
        max_mass = max_mass.clamp(spawn::MAX_MASS_FLOOR, spawn::MAX_MASS_CAP);
        let min_mass = (max_mass * spawn::MIN_MASS_RATIO).max(spawn::MIN_MASS_FLOOR);

        for _ in 0..count {
            let mut mass = rng.gen_range(min_mass..max_mass);
            let mut radius = mass_to_radius(mass);

            let mut min_x = radius;
            let mut max_x = self.bounds_width - radius;
            let mut min_y = radius;
            let mut max_y = self.bounds_height - radius;
            if min_x >= max_x || min_y >= max_y {
                // Radius cannot fit; fall back to the smallest mass
                mass = mass.min(spawn::MIN_MASS_FLOOR);
                radius = mass_to_radius(mass);
                min_x = radius;
                max_x = self.bounds_width - radius;
                min_y = radius;
                max_y = self.bounds_height - radius;
            }

            let position = Vec2::new(
                rng.gen_range(min_x..(min_x + 1.0).max(max_x)),
                rng.gen_range(min_y..(min_y + 1.0).max(max_y)),
            );
            let velocity = Vec2::new(
                rng.gen_range(-spawn::VELOCITY_RANGE..spawn::VELOCITY_RANGE),
                rng.gen_range(-spawn::VELOCITY_RANGE..spawn::VELOCITY_RANGE),
            );

            particles.push(Particle::new(position, velocity, mass));
        }
        particles
    }
}

fn build_shapes(particles: &[Particle]) -> Vec<RenderShape> {
    particles
        .iter()
        .map(|p| RenderShape {
            position: p.position,
            radius: p.radius(),
        })
        .collect()
}
