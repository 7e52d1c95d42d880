//! Spawn placement: randomized search for target and auxiliary puck positions.
//!
//! Stateless: every call samples afresh from the supplied RNG. Searches never
//! fail outright; each `place_*` function has a deterministic fallback.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use puckshot_core::config::SpawnConfig;
use puckshot_core::types::Viewport;

/// Constraints shared by every placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRules {
    pub min_distance_from_player: f64,
    /// Viewport units (0..0.5).
    pub viewport_margin: f64,
    pub retry_attempts: u32,
}

impl From<&SpawnConfig> for PlacementRules {
    fn from(config: &SpawnConfig) -> Self {
        Self {
            min_distance_from_player: config.min_distance_from_player,
            viewport_margin: config.viewport_margin,
            retry_attempts: config.spawn_retry_attempts,
        }
    }
}

/// Ring around a centre point, used to scatter auxiliary pucks.
#[derive(Debug, Clone, Copy)]
pub struct Annulus {
    pub center: DVec2,
    pub radius_min: f64,
    pub radius_max: f64,
}

/// Draw up to `attempts` candidates and return the first accepted one.
fn sample_position<R, S, A>(rng: &mut R, attempts: u32, mut sample: S, accept: A) -> Option<DVec2>
where
    R: Rng,
    S: FnMut(&mut R) -> DVec2,
    A: Fn(DVec2) -> bool,
{
    (0..attempts).map(|_| sample(rng)).find(|&candidate| accept(candidate))
}

/// Random position inside the viewport margin, at least
/// `min_distance_from_player` from the player when there is one.
/// `None` without a camera or when every attempt was rejected.
pub fn find_target_position<R: Rng>(
    rng: &mut R,
    rules: &PlacementRules,
    camera: Option<&Viewport>,
    player: Option<DVec2>,
) -> Option<DVec2> {
    let camera = camera?;
    let lo = rules.viewport_margin;
    let hi = 1.0 - rules.viewport_margin;

    sample_position(
        rng,
        rules.retry_attempts,
        |rng| {
            let vx = rng.gen_range(lo..=hi);
            let vy = rng.gen_range(lo..=hi);
            camera.viewport_to_world(DVec2::new(vx, vy))
        },
        |candidate| {
            player.map_or(true, |p| candidate.distance(p) >= rules.min_distance_from_player)
        },
    )
}

/// Fallback target position: offset from the player along +X, else the
/// viewport centre, else the world origin.
pub fn target_fallback(
    rules: &PlacementRules,
    camera: Option<&Viewport>,
    player: Option<DVec2>,
) -> DVec2 {
    match (player, camera) {
        (Some(p), _) => p + DVec2::X * rules.min_distance_from_player,
        (None, Some(camera)) => camera.viewport_to_world(DVec2::splat(0.5)),
        (None, None) => DVec2::ZERO,
    }
}

/// Target position, falling back deterministically when the search fails.
pub fn place_target<R: Rng>(
    rng: &mut R,
    rules: &PlacementRules,
    camera: Option<&Viewport>,
    player: Option<DVec2>,
) -> DVec2 {
    find_target_position(rng, rules, camera, player)
        .unwrap_or_else(|| target_fallback(rules, camera, player))
}

/// Random position in the annulus that stays inside the viewport margin.
/// Without a camera, the first sample is accepted.
pub fn find_auxiliary_position<R: Rng>(
    rng: &mut R,
    annulus: &Annulus,
    rules: &PlacementRules,
    camera: Option<&Viewport>,
) -> Option<DVec2> {
    sample_position(
        rng,
        rules.retry_attempts,
        |rng| {
            let angle = rng.gen_range(0.0..TAU);
            let dist = rng.gen_range(annulus.radius_min..=annulus.radius_max);
            annulus.center + DVec2::from_angle(angle) * dist
        },
        |candidate| camera.map_or(true, |c| c.contains_with_margin(candidate, rules.viewport_margin)),
    )
}

/// Position of the `index`-th auxiliary puck. On exhaustion the annulus
/// centre is clamped into the viewport margin; without a camera the pucks
/// line up along +X at multiples of the inner radius.
pub fn place_auxiliary<R: Rng>(
    rng: &mut R,
    annulus: &Annulus,
    rules: &PlacementRules,
    camera: Option<&Viewport>,
    index: u32,
) -> DVec2 {
    find_auxiliary_position(rng, annulus, rules, camera).unwrap_or_else(|| match camera {
        Some(camera) => camera.clamp_with_margin(annulus.center, rules.viewport_margin),
        None => annulus.center + DVec2::X * annulus.radius_min * f64::from(index + 1),
    })
}
