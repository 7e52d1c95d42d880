//! Snapshot system: reads the physics world and the game objects into a
//! complete GameStateSnapshot.
//!
//! Read-only. Never modifies the world.

use hecs::World;

use puckshot_core::components::Motion;
use puckshot_core::enums::{BodyKind, GamePhase};
use puckshot_core::events::GameEvent;
use puckshot_core::state::{BodyView, GameStateSnapshot};
use puckshot_core::types::{BodyHandle, SimTime};

use crate::monitor::TargetMonitor;
use crate::shot::ShotController;

/// Build a complete GameStateSnapshot for the current tick.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    shot: &ShotController,
    monitor: &TargetMonitor,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        shot: shot.view(),
        target: monitor.target_view(),
        progress: monitor.progress_view(),
        bodies: build_bodies(world),
        events,
    }
}

/// Every body in the world, ordered by handle.
pub fn build_bodies(world: &World) -> Vec<BodyView> {
    let mut query = world.query::<(&BodyKind, &Motion)>();
    let mut bodies: Vec<BodyView> = query
        .iter()
        .map(|(entity, (kind, motion))| BodyView {
            handle: BodyHandle(entity.to_bits().get()),
            kind: *kind,
            position: motion.position,
            velocity: motion.velocity,
            rotation: motion.rotation,
        })
        .collect();
    bodies.sort_by_key(|b| b.handle.0);
    bodies
}
