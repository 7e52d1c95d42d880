//! Cleanup system: removes bodies whose lifetime has run out.

use hecs::{Entity, World};

use puckshot_core::components::Lifetime;

/// Tick down lifetimes and despawn expired bodies.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_secs -= dt;
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
