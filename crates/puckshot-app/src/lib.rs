//! PUCKSHOT headless host.
//!
//! Runs the simulation engine on its own thread and drives it from console
//! input, logging HUD lines as the score changes.

pub mod console;
pub mod game_loop;
pub mod state;

pub use puckshot_core as core;
