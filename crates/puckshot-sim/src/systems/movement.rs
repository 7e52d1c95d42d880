//! Kinematic integration system.
//!
//! Applies linear damping, then updates position from velocity:
//! position += velocity * dt.

use hecs::World;

use puckshot_core::components::{Motion, RigidBody};
use puckshot_core::constants::SLEEP_SPEED;

/// Run kinematic integration for all bodies.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (motion, body)) in world.query_mut::<(&mut Motion, &RigidBody)>() {
        if body.linear_damping > 0.0 {
            motion.velocity /= 1.0 + body.linear_damping * dt;
            // Damped bodies settle instead of creeping forever.
            if motion.velocity.length() < SLEEP_SPEED {
                motion.velocity = glam::DVec2::ZERO;
            }
        }
        motion.position += motion.velocity * dt;
    }
}
