//! Uniform spatial hash grid
//!
//! Buckets every particle index by the cell containing its center, then
//! checks candidates in a 9-cell neighborhood. Near O(n) for particle
//! fields whose radii are bounded by half the cell size.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::sim::constants::spatial_hash::DEFAULT_CELL_SIZE;
use crate::sim::detectors::{resolve_if_colliding, CollisionDetector};
use crate::sim::particle::Particle;

/// Grid cell key - cell coordinates packed into one integer
type CellKey = i64;

/// Neighbor offsets for the 9-cell query (including the current cell)
const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[inline]
fn pack_key(cx: i32, cy: i32) -> CellKey {
    ((cx as i64) << 32) ^ (cy as u32 as i64)
}

/// Spatial hash collision detector
///
/// The cell size is a tuning parameter independent of particle radius: if
/// it is much smaller than the largest radius, a particle can overlap
/// neighbors beyond the 1-ring and be missed. Callers size it so that
/// cell_size >= 2x the maximum expected radius.
pub struct SpatialHashDetector {
    cell_size: f64,
    /// Map from packed cell key to particle indices; buckets are cleared in
    /// place each call so their allocations survive across frames
    grid: HashMap<CellKey, Vec<usize>, FxBuildHasher>,
}

impl SpatialHashDetector {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            grid: HashMap::default(),
        }
    }

    #[inline]
    fn cell_coords(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    #[inline]
    fn key_for(&self, x: f64, y: f64) -> CellKey {
        let (cx, cy) = self.cell_coords(x, y);
        pack_key(cx, cy)
    }
}

impl Default for SpatialHashDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl CollisionDetector for SpatialHashDetector {
    fn detect_and_resolve(&mut self, particles: &mut [Particle]) {
        // Rebuild the grid from scratch; keep bucket allocations
        for bucket in self.grid.values_mut() {
            bucket.clear();
        }
        for (i, p) in particles.iter().enumerate() {
            let key = self.key_for(p.position.x, p.position.y);
            self.grid.entry(key).or_default().push(i);
        }

        // For each occupied cell, check intra-cell pairs and candidates in
        // the neighboring cells. The global j > i filter keeps each pair
        // from resolving twice across the cell iteration.
        for indices in self.grid.values() {
            for a in 0..indices.len() {
                let i = indices[a];

                // Same cell pairs; bucket indices ascend, so j > i holds
                for &j in &indices[a + 1..] {
                    resolve_if_colliding(particles, i, j);
                }

                // Neighborhood lookup from the particle's current position,
                // which an earlier resolution in this pass may have moved
                let (cx, cy) = {
                    let p = &particles[i];
                    self.cell_coords(p.position.x, p.position.y)
                };
                for &(dx, dy) in &NEIGHBOR_OFFSETS {
                    if let Some(neighbors) = self.grid.get(&pack_key(cx + dx, cy + dy)) {
                        for &j in neighbors {
                            if j <= i {
                                continue;
                            }
                            resolve_if_colliding(particles, i, j);
                        }
                    }
                }
            }
        }
    }
}
