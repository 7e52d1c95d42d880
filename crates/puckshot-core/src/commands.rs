//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// The charge button was pressed this tick (aim, lock, scrub).
    ChargePress,
    /// Discard the current target and place a fresh one (debug respawn).
    SpawnNewTarget,

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = paused).
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
