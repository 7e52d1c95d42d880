//! Events emitted by the simulation for visual, audio and UI feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::AlertLevel;
use crate::types::LaunchRequest;

/// Notifications for the rendering, audio and UI collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Shot controller ---
    /// Show or hide the aim indicator line.
    AimIndicatorVisible { visible: bool },
    /// Aim indicator endpoints changed.
    AimIndicatorMoved { origin: DVec2, end: DVec2 },
    /// A charge press landed during scrubbing.
    ChargePulse {
        press_count: u32,
        amount: f64,
        locked_angle: f64,
    },
    /// A puck was launched.
    ShotFired { request: LaunchRequest },

    // --- Target monitor ---
    /// A new target was placed.
    TargetSpawned {
        target_id: u32,
        position: DVec2,
        auxiliary_pucks: u32,
    },
    /// A tracked puck came to rest on the target.
    TargetHit { target_id: u32, hits_so_far: u32 },
    /// Counters changed.
    ProgressChanged { hits_left: u32, shots_fired: u32 },
    /// Goal reached. Terminal.
    GameWon { shots_fired: u32 },

    /// An operation was skipped (missing template, etc.).
    Diagnostic { level: AlertLevel, message: String },
}

/// Receiver of game events. The core never renders, plays or lays out
/// anything itself; it only emits.
pub trait EffectsSink {
    fn emit(&mut self, event: GameEvent);
}

impl EffectsSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
