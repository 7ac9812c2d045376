//! Particle state and pairwise collision response
//!
//! A particle is a point mass with a radius derived from its mass. It owns
//! its own boundary reflection and overlap/resolution logic; the detectors
//! only decide which pairs to hand to `resolve_collision`.

use std::time::Instant;

use crate::sim::constants::mass_to_radius;
use crate::util::vec2::Vec2;

/// A circular point mass in the arena
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    /// Monotonic creation instant, used for oldest-first culling
    created_at: Instant,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            created_at: Instant::now(),
        }
    }

    /// Radius is always recomputed from mass, never stored
    #[inline]
    pub fn radius(&self) -> f64 {
        mass_to_radius(self.mass)
    }

    #[inline]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Integrate position by velocity * dt, then reflect off the arena
    /// walls independently per axis.
    ///
    /// Reflection is perfectly elastic: the center is clamped so the disk
    /// edge sits on the wall and the velocity component is negated. Exact
    /// equality at the boundary counts as not overflowing.
    pub fn update(&mut self, dt: f64, bounds_width: f64, bounds_height: f64) {
        self.position += self.velocity * dt;

        let radius = self.radius();

        if self.position.x > bounds_width - radius {
            self.position.x = bounds_width - radius;
            self.velocity.x = -self.velocity.x;
        } else if self.position.x < radius {
            self.position.x = radius;
            self.velocity.x = -self.velocity.x;
        }

        if self.position.y > bounds_height - radius {
            self.position.y = bounds_height - radius;
            self.velocity.y = -self.velocity.y;
        } else if self.position.y < radius {
            self.position.y = radius;
            self.velocity.y = -self.velocity.y;
        }
    }

    /// True iff the disks overlap. Touching circles (distance exactly equal
    /// to the radii sum) do not collide.
    #[inline]
    pub fn is_colliding(&self, other: &Particle) -> bool {
        let distance = self.position.distance_to(other.position);
        distance < self.radius() + other.radius()
    }

    /// Push an overlapping pair apart and apply an elastic impulse.
    ///
    /// Positional correction is apportioned by the other particle's mass
    /// fraction, so the heavier particle moves less. The impulse is skipped
    /// when the pair is already separating along the collision normal,
    /// which prevents sticking. Coincident centers (distance zero) are a
    /// silent no-op; there is no meaningful normal to resolve along.
    pub fn resolve_collision(&mut self, other: &mut Particle) {
        let delta = other.position - self.position;
        let (normal, distance) = delta.normalize_with_length();

        if distance == 0.0 {
            return;
        }

        let min_distance = self.radius() + other.radius();
        let overlap = min_distance - distance;

        // Separate particles, heavier one moves less
        let total_mass = self.mass + other.mass;
        self.position -= normal * (overlap * (other.mass / total_mass));
        other.position += normal * (overlap * (self.mass / total_mass));

        // Relative velocity along the collision normal
        let relative_velocity = other.velocity - self.velocity;
        let normal_velocity = relative_velocity.dot(normal);

        // Don't resolve if velocities are separating
        if normal_velocity > 0.0 {
            return;
        }

        // Elastic collision impulse, conserves momentum
        let impulse = 2.0 * normal_velocity / total_mass;
        self.velocity += normal * (impulse * other.mass);
        other.velocity -= normal * (impulse * self.mass);
    }
}
