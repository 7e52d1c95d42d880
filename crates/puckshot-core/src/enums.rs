//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Input phase of the shot controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Waiting for the first charge press.
    #[default]
    Idle,
    /// Aim angle sweeping back and forth between the bounds.
    Aiming,
    /// Aim locked; presses add power until the finalize delay elapses.
    Scrubbing,
}

/// What a physics body represents to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Puck launched by the player. Tracked for landing.
    ShotPuck,
    /// Decorative puck scattered around the target. Never scored.
    AuxiliaryPuck,
    /// Short-lived cosmetic body spawned on each scrub press.
    ScrubMarker,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// Goal reached. Terminal until the host restarts with a new engine.
    Won,
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
}
