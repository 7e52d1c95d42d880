//! Physics collaborator boundary and the sandbox world behind it.
//!
//! The game core only ever talks to [`PhysicsWorld`]. [`SandboxPhysics`] is a small
//! hecs-backed implementation: impulses, linear damping,
//! integration and lifetime expiry. No collision response.

use glam::DVec2;
use hecs::{Entity, World};

use puckshot_core::components::{Lifetime, Motion, RigidBody};
use puckshot_core::config::PuckTemplate;
use puckshot_core::enums::BodyKind;
use puckshot_core::state::BodyView;
use puckshot_core::types::BodyHandle;

use crate::systems;

/// Everything needed to create a body.
#[derive(Debug, Clone, Copy)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Degrees.
    pub rotation: f64,
    pub mass: f64,
    pub linear_damping: f64,
    /// Despawn after this many seconds.
    pub lifetime_secs: Option<f64>,
}

impl BodySpec {
    /// A resting puck built from a template.
    pub fn puck(kind: BodyKind, position: DVec2, template: &PuckTemplate) -> Self {
        Self {
            kind,
            position,
            velocity: DVec2::ZERO,
            rotation: 0.0,
            mass: template.mass,
            linear_damping: template.linear_damping,
            lifetime_secs: None,
        }
    }
}

/// The services the game core needs from a physics engine.
pub trait PhysicsWorld {
    fn spawn_body(&mut self, spec: BodySpec) -> BodyHandle;
    /// Instantaneous change in momentum.
    fn apply_impulse(&mut self, body: BodyHandle, impulse: DVec2);
    /// `None` once the body no longer exists.
    fn position(&self, body: BodyHandle) -> Option<DVec2>;
    fn velocity(&self, body: BodyHandle) -> Option<DVec2>;
    /// Removing a body that is already gone is not an error.
    fn despawn(&mut self, body: BodyHandle);
}

/// Minimal physics world backed by a hecs ECS world.
#[derive(Default)]
pub struct SandboxPhysics {
    world: World,
    despawn_buffer: Vec<Entity>,
}

impl SandboxPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every body by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        systems::movement::run(&mut self.world, dt);
        systems::cleanup::run(&mut self.world, dt, &mut self.despawn_buffer);
    }

    /// Overwrite a body's kinematic state (test and scripting hook).
    pub fn set_motion(&mut self, body: BodyHandle, position: DVec2, velocity: DVec2) {
        let Some(entity) = entity_of(body) else {
            return;
        };
        if let Ok(mut motion) = self.world.get::<&mut Motion>(entity) {
            motion.position = position;
            motion.velocity = velocity;
        }
    }

    pub fn contains(&self, body: BodyHandle) -> bool {
        entity_of(body).is_some_and(|entity| self.world.contains(entity))
    }

    pub fn body_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Number of live bodies of one kind.
    pub fn count_kind(&self, kind: BodyKind) -> usize {
        let mut query = self.world.query::<&BodyKind>();
        query.iter().filter(|(_, k)| **k == kind).count()
    }

    /// All bodies, ordered by handle.
    pub fn body_views(&self) -> Vec<BodyView> {
        systems::snapshot::build_bodies(&self.world)
    }

    /// The underlying ECS world, for read-only systems.
    pub fn world(&self) -> &World {
        &self.world
    }
}

impl PhysicsWorld for SandboxPhysics {
    fn spawn_body(&mut self, spec: BodySpec) -> BodyHandle {
        let motion = Motion {
            position: spec.position,
            velocity: spec.velocity,
            rotation: spec.rotation,
        };
        let body = RigidBody {
            mass: spec.mass,
            linear_damping: spec.linear_damping,
        };
        let entity = match spec.lifetime_secs {
            Some(remaining_secs) => {
                self.world
                    .spawn((spec.kind, motion, body, Lifetime { remaining_secs }))
            }
            None => self.world.spawn((spec.kind, motion, body)),
        };
        handle_of(entity)
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: DVec2) {
        let Some(entity) = entity_of(body) else {
            return;
        };
        let mass = match self.world.get::<&RigidBody>(entity) {
            Ok(rb) if rb.mass > 0.0 => rb.mass,
            _ => return,
        };
        if let Ok(mut motion) = self.world.get::<&mut Motion>(entity) {
            motion.velocity += impulse / mass;
        }
    }

    fn position(&self, body: BodyHandle) -> Option<DVec2> {
        let entity = entity_of(body)?;
        self.world.get::<&Motion>(entity).ok().map(|m| m.position)
    }

    fn velocity(&self, body: BodyHandle) -> Option<DVec2> {
        let entity = entity_of(body)?;
        self.world.get::<&Motion>(entity).ok().map(|m| m.velocity)
    }

    fn despawn(&mut self, body: BodyHandle) {
        if let Some(entity) = entity_of(body) {
            let _ = self.world.despawn(entity);
        }
    }
}

fn handle_of(entity: Entity) -> BodyHandle {
    BodyHandle(entity.to_bits().get())
}

fn entity_of(body: BodyHandle) -> Option<Entity> {
    Entity::from_bits(body.0)
}
