//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz). One tick per rendered frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack for comparisons against accumulated simulation time.
pub const TIMER_EPSILON: f64 = 1e-9;

/// Maximum host time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Launch ---

/// Base launch impulse.
pub const BASE_FORCE: f64 = 10.0;

/// Extra impulse at a full scrub (scrub fills 0..1).
pub const MAX_EXTRA_FORCE: f64 = 20.0;

/// Distance in front of the launcher at which pucks appear when no spawn
/// point is configured.
pub const LAUNCHER_MUZZLE_OFFSET: f64 = 1.0;

// --- Aiming ---

/// Lower aim bound (degrees).
pub const AIM_MIN_ANGLE: f64 = -45.0;

/// Upper aim bound (degrees).
pub const AIM_MAX_ANGLE: f64 = 45.0;

/// Aim sweep speed (degrees per second).
pub const AIM_SWEEP_SPEED: f64 = 120.0;

/// Length of the aim indicator line (world units).
pub const AIM_LENGTH: f64 = 2.5;

// --- Scrubbing ---

/// Scrub added per charge press.
pub const SCRUB_PER_PRESS: f64 = 0.05;

/// Seconds after the last press before the shot fires.
pub const SCRUB_FINALIZE_DELAY: f64 = 1.0;

/// Upper bound on the scrub amount.
pub const MAX_SCRUB: f64 = 1.0;

/// Spacing along the aim line between consecutive scrub markers.
pub const SCRUB_SPAWN_SPACING: f64 = 0.25;

/// Base speed of scrub markers.
pub const SCRUB_MOVE_SPEED: f64 = 4.5;

/// Additional scrub marker speed per unit of scrub.
pub const SCRUB_SPEED_SCALE_BY_AMOUNT: f64 = 2.0;

/// Perpendicular distance from the aim line at which scrub markers appear.
pub const SCRUB_MARKER_PERP_OFFSET: f64 = 0.25;

/// Lifetime of a scrub marker (seconds).
pub const SCRUB_MARKER_LIFETIME_SECS: f64 = 0.1;

// --- Spawning ---

/// Minimum distance between a new target and the player.
pub const MIN_DISTANCE_FROM_PLAYER: f64 = 3.0;

/// Viewport margin (0..0.5) keeping spawns inside the screen.
pub const VIEWPORT_MARGIN: f64 = 0.05;

/// Attempts at finding a valid spawn position before falling back.
pub const SPAWN_RETRY_ATTEMPTS: u32 = 20;

/// Fewest auxiliary pucks around a new target.
pub const MIN_AUX_PUCKS: u32 = 3;

/// Most auxiliary pucks around a new target.
pub const MAX_AUX_PUCKS: u32 = 5;

/// Inner radius of the auxiliary puck annulus.
pub const AUX_PUCK_RADIUS_MIN: f64 = 0.5;

/// Outer radius of the auxiliary puck annulus.
pub const AUX_PUCK_RADIUS_MAX: f64 = 1.5;

// --- Monitoring ---

/// How close a puck must be to the target to count as landed.
pub const SUCCESS_RADIUS: f64 = 0.6;

/// A puck at or below this speed counts as stopped.
pub const STOP_VELOCITY_THRESHOLD: f64 = 0.05;

/// Seconds between landing polls.
pub const CHECK_INTERVAL: f64 = 0.2;

/// Seconds between a hit and the next target spawn.
pub const RESPAWN_DELAY: f64 = 0.5;

/// Targets to hit for the win.
pub const GOAL_HITS: u32 = 5;

// --- Sandbox physics ---

/// Default puck mass.
pub const PUCK_MASS: f64 = 1.0;

/// Default puck linear damping (per second).
pub const PUCK_LINEAR_DAMPING: f64 = 1.5;

/// Speed below which the sandbox puts a damped body to rest.
pub const SLEEP_SPEED: f64 = 0.01;

/// Default target visual radius.
pub const TARGET_RADIUS: f64 = 0.5;

// --- Camera ---

/// Default camera half-width (world units).
pub const CAMERA_HALF_WIDTH: f64 = 8.0;

/// Default camera half-height (world units).
pub const CAMERA_HALF_HEIGHT: f64 = 4.5;

/// Default camera centre x, in front of the launcher.
pub const CAMERA_CENTER_X: f64 = 6.0;
