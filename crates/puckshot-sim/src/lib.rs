//! Simulation engine for PUCKSHOT.
//!
//! Owns the shot controller, the target monitor and a sandbox physics world,
//! runs them at a fixed tick rate, and produces GameStateSnapshots for the host.

pub mod aim;
pub mod engine;
pub mod monitor;
pub mod physics;
pub mod scrub;
pub mod shot;
pub mod spawn;
pub mod systems;

pub use engine::SimulationEngine;
pub use puckshot_core as core;
