//! Fundamental geometric and simulation types.
//!
//! World space is 2D, x = right, y = up, in world units. Angles exposed to
//! gameplay are in degrees, counter-clockwise positive.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a body owned by the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick. Elapsed time is derived from the tick count so
    /// it never drifts.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }
}

/// A single launch, produced once per fire event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Where the puck is created.
    pub origin: DVec2,
    /// Unit launch direction.
    pub direction: DVec2,
    /// Impulse magnitude.
    pub force: f64,
}

impl LaunchRequest {
    /// The instantaneous impulse vector to apply to the new puck.
    pub fn impulse(&self) -> DVec2 {
        self.direction * self.force
    }
}

/// Orthographic 2D camera: an axis-aligned window onto world space.
///
/// Viewport coordinates run from (0, 0) at the bottom-left corner to (1, 1)
/// at the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: DVec2,
    pub half_extents: DVec2,
}

impl Viewport {
    pub fn new(center: DVec2, half_extents: DVec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Map a viewport coordinate to world space.
    pub fn viewport_to_world(&self, viewport: DVec2) -> DVec2 {
        self.center + (viewport * 2.0 - DVec2::ONE) * self.half_extents
    }

    /// Map a world position to viewport coordinates.
    pub fn world_to_viewport(&self, world: DVec2) -> DVec2 {
        let extents = self.half_extents.max(DVec2::splat(f64::EPSILON));
        ((world - self.center) / extents + DVec2::ONE) * 0.5
    }

    /// Whether a world position lies inside the viewport shrunk by `margin`
    /// on every side (margin in viewport units).
    pub fn contains_with_margin(&self, world: DVec2, margin: f64) -> bool {
        let vp = self.world_to_viewport(world);
        vp.x >= margin && vp.x <= 1.0 - margin && vp.y >= margin && vp.y <= 1.0 - margin
    }

    /// Clamp a world position to the nearest point inside the margin.
    pub fn clamp_with_margin(&self, world: DVec2, margin: f64) -> DVec2 {
        let vp = self
            .world_to_viewport(world)
            .clamp(DVec2::splat(margin), DVec2::splat(1.0 - margin));
        self.viewport_to_world(vp)
    }
}

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_deg(v: DVec2, degrees: f64) -> DVec2 {
    DVec2::from_angle(degrees.to_radians()).rotate(v)
}
