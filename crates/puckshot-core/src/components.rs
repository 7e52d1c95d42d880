//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Kinematic state of a body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Motion {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Facing in degrees. Cosmetic only.
    pub rotation: f64,
}

/// Inertial properties of a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub mass: f64,
    /// Fraction of velocity lost per second.
    pub linear_damping: f64,
}

/// Remaining life of a short-lived body. Despawned at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}
