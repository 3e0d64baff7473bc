//! Simulation engine for BUGSTORM.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use bugstorm_core as core;
pub use engine::{SimConfig, SimulationEngine};
