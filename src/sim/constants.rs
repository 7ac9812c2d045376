/// Particle constants
pub mod particle {
    /// Radius scaling factor: radius = sqrt(mass) * RADIUS_SCALE
    /// Radius grows sub-linearly with mass (fixed density)
    pub const RADIUS_SCALE: f64 = 20.0;
}

/// Population generation constants
pub mod spawn {
    /// Fraction of the arena area the drawn circles may cover in total
    pub const MAX_AREA_COVERAGE: f64 = 0.3;
    /// Velocity is sampled uniformly in [-VELOCITY_RANGE, VELOCITY_RANGE] per axis
    pub const VELOCITY_RANGE: f64 = 100.0;
    /// Minimum mass is this fraction of the derived maximum mass
    pub const MIN_MASS_RATIO: f64 = 0.1;
    /// Floor for the derived maximum mass
    pub const MAX_MASS_FLOOR: f64 = 0.1;
    /// Cap for the derived maximum mass
    pub const MAX_MASS_CAP: f64 = 10.0;
    /// Floor for the derived minimum mass, also the fallback mass when a
    /// particle's radius cannot fit inside the arena
    pub const MIN_MASS_FLOOR: f64 = 0.01;
}

/// Spatial hash constants
pub mod spatial_hash {
    /// Default grid cell size in world units
    ///
    /// A tuning parameter independent of particle radius. For completeness
    /// it must be at least 2x the maximum expected radius, otherwise a
    /// particle can overlap neighbors beyond the 1-ring and be missed.
    pub const DEFAULT_CELL_SIZE: f64 = 40.0;
}

/// Quadtree constants
pub mod quadtree {
    /// Indices a node holds before subdividing into four quadrants
    pub const NODE_CAPACITY: usize = 8;
    /// Maximum subdivision depth; nodes at this depth accept overflow
    pub const MAX_DEPTH: usize = 8;
}

/// Stepping constants for the headless runner
pub mod tick {
    /// Runner tick rate in Hz
    pub const TICK_RATE: u32 = 60;
    /// Delta time per tick in seconds
    pub const DT: f64 = 1.0 / TICK_RATE as f64;
    /// Upper bound callers apply to dt before handing it to the core;
    /// bounds integration error on frame hitches
    pub const MAX_DT: f64 = 0.5;
}

/// Calculate radius from mass
#[inline]
pub fn mass_to_radius(mass: f64) -> f64 {
    mass.sqrt() * particle::RADIUS_SCALE
}

/// Calculate mass from radius (inverse of mass_to_radius)
#[inline]
pub fn radius_to_mass(radius: f64) -> f64 {
    (radius / particle::RADIUS_SCALE).powi(2)
}
