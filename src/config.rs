use std::str::FromStr;

use crate::sim::constants::{spatial_hash, tick};
use crate::sim::detectors::{
    BruteForceDetector, CollisionDetector, QuadTreeDetector, SpatialHashDetector,
};

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("cell_size must be positive, got {0}")]
    InvalidCellSize(f64),
    #[error("dt must be positive, got {0}")]
    InvalidDt(f64),
}

/// Detection strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorKind {
    #[default]
    BruteForce,
    SpatialHash,
    QuadTree,
}

impl DetectorKind {
    /// Display name reported by the simulation
    pub fn display_name(&self) -> &'static str {
        match self {
            DetectorKind::BruteForce => "Brute Force",
            DetectorKind::SpatialHash => "Spatial Hash",
            DetectorKind::QuadTree => "QuadTree",
        }
    }

    /// Construct the detector this kind selects
    pub fn build(&self, cell_size: f64) -> Box<dyn CollisionDetector> {
        match self {
            DetectorKind::BruteForce => Box::new(BruteForceDetector),
            DetectorKind::SpatialHash => Box::new(SpatialHashDetector::new(cell_size)),
            DetectorKind::QuadTree => Box::new(QuadTreeDetector::new()),
        }
    }
}

impl FromStr for DetectorKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brute" | "brute_force" | "bruteforce" => Ok(DetectorKind::BruteForce),
            "hash" | "spatial_hash" | "spatialhash" => Ok(DetectorKind::SpatialHash),
            "quadtree" | "quad_tree" | "tree" => Ok(DetectorKind::QuadTree),
            _ => Err(()),
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Arena width in world units
    pub arena_width: f64,
    /// Arena height in world units
    pub arena_height: f64,
    /// Initial population size
    pub initial_particles: usize,
    /// Active detection strategy
    pub detector: DetectorKind,
    /// Cell size for the spatial hash strategy
    pub cell_size: f64,
    /// Fixed step size in seconds (clamped to MAX_DT by the runner)
    pub dt: f64,
    /// Number of steps the runner executes
    pub ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: 1280.0,
            arena_height: 720.0,
            initial_particles: 300,
            detector: DetectorKind::default(),
            cell_size: spatial_hash::DEFAULT_CELL_SIZE,
            dt: tick::DT,
            ticks: 1000,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(width) = std::env::var("ARENA_WIDTH") {
            if let Ok(parsed) = width.parse::<f64>() {
                if parsed > 0.0 {
                    config.arena_width = parsed;
                } else {
                    tracing::warn!("ARENA_WIDTH must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid ARENA_WIDTH '{}', using default", width);
            }
        }

        if let Ok(height) = std::env::var("ARENA_HEIGHT") {
            if let Ok(parsed) = height.parse::<f64>() {
                if parsed > 0.0 {
                    config.arena_height = parsed;
                } else {
                    tracing::warn!("ARENA_HEIGHT must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid ARENA_HEIGHT '{}', using default", height);
            }
        }

        if let Ok(count) = std::env::var("PARTICLE_COUNT") {
            if let Ok(parsed) = count.parse::<usize>() {
                config.initial_particles = parsed;
            } else {
                tracing::warn!("Invalid PARTICLE_COUNT '{}', using default", count);
            }
        }

        if let Ok(detector) = std::env::var("DETECTOR") {
            if let Ok(parsed) = detector.parse() {
                config.detector = parsed;
            } else {
                tracing::warn!(
                    "Invalid DETECTOR '{}' (expected brute|hash|quadtree), using default",
                    detector
                );
            }
        }

        if let Ok(cell_size) = std::env::var("CELL_SIZE") {
            if let Ok(parsed) = cell_size.parse::<f64>() {
                if parsed > 0.0 {
                    config.cell_size = parsed;
                } else {
                    tracing::warn!("CELL_SIZE must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid CELL_SIZE '{}', using default", cell_size);
            }
        }

        if let Ok(dt) = std::env::var("SIM_DT") {
            if let Ok(parsed) = dt.parse::<f64>() {
                if parsed > 0.0 {
                    config.dt = parsed;
                } else {
                    tracing::warn!("SIM_DT must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid SIM_DT '{}', using default", dt);
            }
        }

        if let Ok(ticks) = std::env::var("TICKS") {
            if let Ok(parsed) = ticks.parse::<u64>() {
                config.ticks = parsed;
            } else {
                tracing::warn!("Invalid TICKS '{}', using default", ticks);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt(self.dt));
        }
        Ok(())
    }
}
