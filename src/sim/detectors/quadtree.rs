//! Adaptive quadtree partitioning
//!
//! Rebuilt from scratch every call: a bounding box is fitted over all
//! particle centers, padded by the current maximum radius so no disk can
//! extend outside the root region, and indices are inserted with a
//! capacity-bounded bucket per node. Nodes live in a flat arena addressed
//! by index; the arena is cleared, not dropped, between calls to avoid
//! allocation churn on the per-frame rebuild.

use smallvec::SmallVec;

use crate::sim::constants::quadtree::{MAX_DEPTH, NODE_CAPACITY};
use crate::sim::detectors::{resolve_if_colliding, CollisionDetector};
use crate::sim::particle::Particle;
use crate::util::vec2::Vec2;

const ROOT: usize = 0;

/// Axis-aligned bounding box as center + half extents
#[derive(Debug, Clone, Copy)]
struct Aabb {
    center: Vec2,
    half: Vec2,
}

impl Aabb {
    /// Standard AABB overlap test on both axes
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        d.x <= self.half.x + other.half.x && d.y <= self.half.y + other.half.y
    }
}

/// Child quadrant for a point relative to a node center.
///
/// Bit 0: east half (x >= center.x), bit 1: south half (y >= center.y).
/// Index order is therefore NW, NE, SW, SE.
#[inline]
fn quadrant(center: Vec2, point: Vec2) -> usize {
    let mut idx = 0;
    if point.x >= center.x {
        idx |= 1;
    }
    if point.y >= center.y {
        idx |= 2;
    }
    idx
}

#[derive(Debug)]
struct QuadNode {
    bounds: Aabb,
    depth: usize,
    /// Particle indices held by this node; inline storage matches the
    /// subdivision capacity, spilling only for depth-capped overflow
    bucket: SmallVec<[usize; NODE_CAPACITY]>,
    /// Indices of the four children in the arena, created on overflow
    children: Option<[usize; 4]>,
}

impl QuadNode {
    fn new(bounds: Aabb, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            bucket: SmallVec::new(),
            children: None,
        }
    }
}

/// Quadtree collision detector
#[derive(Debug, Default)]
pub struct QuadTreeDetector {
    nodes: Vec<QuadNode>,
    /// Reusable candidate buffer for range queries
    candidates: Vec<usize>,
}

impl QuadTreeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the root box over all centers, padded by the maximum radius on
    /// every side, and insert every particle index. Returns that maximum
    /// radius for use as the query margin.
    fn build(&mut self, particles: &[Particle]) -> f64 {
        self.nodes.clear();

        let mut min = Vec2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut max_radius = 0.0f64;
        for p in particles {
            min = min.min(p.position);
            max = max.max(p.position);
            max_radius = max_radius.max(p.radius());
        }

        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5 + Vec2::new(max_radius, max_radius);
        self.nodes.push(QuadNode::new(Aabb { center, half }, 0));

        for i in 0..particles.len() {
            self.insert(i, particles);
        }

        max_radius
    }

    /// Insert one particle index, descending into the child containing its
    /// center. A full node below the depth cap subdivides and pushes its
    /// bucket down; at the cap the bucket grows past capacity instead.
    fn insert(&mut self, idx: usize, particles: &[Particle]) {
        let point = particles[idx].position;
        let mut node = ROOT;
        loop {
            if let Some(children) = self.nodes[node].children {
                node = children[quadrant(self.nodes[node].bounds.center, point)];
                continue;
            }

            if self.nodes[node].bucket.len() < NODE_CAPACITY
                || self.nodes[node].depth >= MAX_DEPTH
            {
                self.nodes[node].bucket.push(idx);
                return;
            }

            // Overflowed leaf: subdivide and redistribute its bucket
            let entries = std::mem::take(&mut self.nodes[node].bucket);
            let children = self.subdivide(node);
            let center = self.nodes[node].bounds.center;
            for entry in entries {
                let q = quadrant(center, particles[entry].position);
                self.nodes[children[q]].bucket.push(entry);
            }
        }
    }

    /// Create the four equal child quadrants around the node's center
    fn subdivide(&mut self, node: usize) -> [usize; 4] {
        let bounds = self.nodes[node].bounds;
        let depth = self.nodes[node].depth;
        let quarter = bounds.half * 0.5;

        let mut children = [0usize; 4];
        for (q, child) in children.iter_mut().enumerate() {
            let offset = Vec2::new(
                if q & 1 == 0 { -quarter.x } else { quarter.x },
                if q & 2 == 0 { -quarter.y } else { quarter.y },
            );
            *child = self.nodes.len();
            self.nodes.push(QuadNode::new(
                Aabb {
                    center: bounds.center + offset,
                    half: quarter,
                },
                depth + 1,
            ));
        }

        self.nodes[node].children = Some(children);
        children
    }

    /// Collect indices from every node whose box intersects the range
    fn query(&self, node: usize, range: &Aabb, out: &mut Vec<usize>) {
        let n = &self.nodes[node];
        if !n.bounds.intersects(range) {
            return;
        }
        out.extend_from_slice(&n.bucket);
        if let Some(children) = n.children {
            for child in children {
                self.query(child, range, out);
            }
        }
    }
}

impl CollisionDetector for QuadTreeDetector {
    fn detect_and_resolve(&mut self, particles: &mut [Particle]) {
        if particles.len() < 2 {
            return;
        }

        let max_radius = self.build(particles);

        let mut candidates = std::mem::take(&mut self.candidates);
        for i in 0..particles.len() {
            candidates.clear();

            // Square range with half-size = own radius + global max radius:
            // a conservative superset of any true overlap partner
            let margin = particles[i].radius() + max_radius;
            let range = Aabb {
                center: particles[i].position,
                half: Vec2::new(margin, margin),
            };
            self.query(ROOT, &range, &mut candidates);

            for &j in &candidates {
                if j <= i {
                    continue;
                }
                resolve_if_colliding(particles, i, j);
            }
        }
        self.candidates = candidates;
    }
}
