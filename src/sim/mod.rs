pub mod constants;
pub mod detectors;
pub mod particle;
pub mod performance;
pub mod simulation;
