//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{BodyHandle, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub shot: ShotView,
    pub target: Option<TargetView>,
    pub progress: ProgressView,
    pub bodies: Vec<BodyView>,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// Shot controller state for the aim line and scrub bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotView {
    pub phase: ShotPhase,
    /// Sweeping aim angle (degrees).
    pub current_angle: f64,
    /// Locked aim angle while scrubbing (degrees).
    pub locked_angle: Option<f64>,
    pub scrub_amount: f64,
    /// Scrub bar fill, 0..1.
    pub scrub_fill: f64,
    pub press_count: u32,
    /// Aim indicator endpoints, when visible.
    pub aim_indicator: Option<(DVec2, DVec2)>,
}

/// The live target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub target_id: u32,
    pub position: DVec2,
    pub radius: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressView {
    pub hits: u32,
    pub hits_left: u32,
    pub shots_fired: u32,
    pub goal_hits: u32,
    pub won: bool,
}

/// A body in the physics world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub handle: BodyHandle,
    pub kind: BodyKind,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Facing (degrees).
    pub rotation: f64,
}
