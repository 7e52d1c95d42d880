//! Tuning and scene configuration.
//!
//! Everything is immutable once the engine is built. Missing JSON fields fall
//! back to the defaults in [`crate::constants`].

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Viewport;

/// Complete configuration for one game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub shot: ShotConfig,
    pub launcher: Launcher,
    pub spawn: SpawnConfig,
    pub monitor: MonitorConfig,
    /// Camera used for spawn placement. `None` = no camera in the scene.
    pub camera: Option<Viewport>,
    pub templates: Templates,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            shot: ShotConfig::default(),
            launcher: Launcher::default(),
            spawn: SpawnConfig::default(),
            monitor: MonitorConfig::default(),
            camera: Some(Viewport::new(
                DVec2::new(CAMERA_CENTER_X, 0.0),
                DVec2::new(CAMERA_HALF_WIDTH, CAMERA_HALF_HEIGHT),
            )),
            templates: Templates::default(),
        }
    }
}

/// Aim sweep, scrub and launch tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub base_force: f64,
    pub max_extra_force: f64,
    /// Optional spread (degrees).
    pub angular_randomness: f64,
    pub aim_min_angle: f64,
    pub aim_max_angle: f64,
    /// Degrees per second.
    pub aim_sweep_speed: f64,
    pub aim_length: f64,
    pub scrub_per_press: f64,
    pub scrub_finalize_delay: f64,
    pub max_scrub: f64,
    pub scrub_spawn_spacing: f64,
    pub scrub_move_speed: f64,
    pub scrub_speed_scale_by_amount: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            base_force: BASE_FORCE,
            max_extra_force: MAX_EXTRA_FORCE,
            angular_randomness: 0.0,
            aim_min_angle: AIM_MIN_ANGLE,
            aim_max_angle: AIM_MAX_ANGLE,
            aim_sweep_speed: AIM_SWEEP_SPEED,
            aim_length: AIM_LENGTH,
            scrub_per_press: SCRUB_PER_PRESS,
            scrub_finalize_delay: SCRUB_FINALIZE_DELAY,
            max_scrub: MAX_SCRUB,
            scrub_spawn_spacing: SCRUB_SPAWN_SPACING,
            scrub_move_speed: SCRUB_MOVE_SPEED,
            scrub_speed_scale_by_amount: SCRUB_SPEED_SCALE_BY_AMOUNT,
        }
    }
}

impl ShotConfig {
    /// Midpoint of the aim bounds, where every sweep starts.
    pub fn aim_midpoint(&self) -> f64 {
        (self.aim_min_angle + self.aim_max_angle) * 0.5
    }
}

/// Where the player stands and which way it faces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Launcher {
    pub position: DVec2,
    /// Aim angle 0 points along this axis.
    pub forward: DVec2,
    /// Explicit muzzle. When absent, pucks appear one unit ahead of the
    /// launcher and indicators start at the launcher itself.
    pub spawn_point: Option<DVec2>,
}

impl Default for Launcher {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            forward: DVec2::X,
            spawn_point: None,
        }
    }
}

impl Launcher {
    /// Where launched pucks are created.
    pub fn muzzle(&self) -> DVec2 {
        self.spawn_point.unwrap_or_else(|| {
            self.position + self.forward.normalize_or_zero() * LAUNCHER_MUZZLE_OFFSET
        })
    }

    /// Where the aim indicator and scrub markers originate.
    pub fn indicator_origin(&self) -> DVec2 {
        self.spawn_point.unwrap_or(self.position)
    }
}

/// Spawn placement rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_distance_from_player: f64,
    /// Viewport margin (0..0.5).
    pub viewport_margin: f64,
    pub spawn_retry_attempts: u32,
    pub min_pucks: u32,
    pub max_pucks: u32,
    pub puck_spawn_radius_min: f64,
    pub puck_spawn_radius_max: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_distance_from_player: MIN_DISTANCE_FROM_PLAYER,
            viewport_margin: VIEWPORT_MARGIN,
            spawn_retry_attempts: SPAWN_RETRY_ATTEMPTS,
            min_pucks: MIN_AUX_PUCKS,
            max_pucks: MAX_AUX_PUCKS,
            puck_spawn_radius_min: AUX_PUCK_RADIUS_MIN,
            puck_spawn_radius_max: AUX_PUCK_RADIUS_MAX,
        }
    }
}

/// Landing detection and win condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub success_radius: f64,
    pub stop_velocity_threshold: f64,
    /// Seconds between polls.
    pub check_interval: f64,
    /// Seconds between a hit and the next spawn.
    pub respawn_delay: f64,
    pub goal_hits: u32,
    /// Place the first target when the engine starts.
    pub spawn_on_start: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            success_radius: SUCCESS_RADIUS,
            stop_velocity_threshold: STOP_VELOCITY_THRESHOLD,
            check_interval: CHECK_INTERVAL,
            respawn_delay: RESPAWN_DELAY,
            goal_hits: GOAL_HITS,
            spawn_on_start: true,
        }
    }
}

/// Body templates. A missing template skips whatever needed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub puck: Option<PuckTemplate>,
    pub target: Option<TargetTemplate>,
    pub scrub_marker: Option<MarkerTemplate>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            puck: Some(PuckTemplate::default()),
            target: Some(TargetTemplate::default()),
            scrub_marker: Some(MarkerTemplate::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PuckTemplate {
    pub mass: f64,
    /// Fraction of velocity lost per second.
    pub linear_damping: f64,
}

impl Default for PuckTemplate {
    fn default() -> Self {
        Self {
            mass: PUCK_MASS,
            linear_damping: PUCK_LINEAR_DAMPING,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTemplate {
    pub radius: f64,
}

impl Default for TargetTemplate {
    fn default() -> Self {
        Self {
            radius: TARGET_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerTemplate {
    pub lifetime_secs: f64,
}

impl Default for MarkerTemplate {
    fn default() -> Self {
        Self {
            lifetime_secs: SCRUB_MARKER_LIFETIME_SECS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject tunings the state machines cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shot = &self.shot;
        non_negative("shot.base_force", shot.base_force)?;
        non_negative("shot.max_extra_force", shot.max_extra_force)?;
        non_negative("shot.angular_randomness", shot.angular_randomness)?;
        finite("shot.aim_min_angle", shot.aim_min_angle)?;
        finite("shot.aim_max_angle", shot.aim_max_angle)?;
        if shot.aim_min_angle > shot.aim_max_angle {
            return Err(ConfigError::invalid(
                "shot.aim_min_angle",
                format!(
                    "{} is above aim_max_angle {}",
                    shot.aim_min_angle, shot.aim_max_angle
                ),
            ));
        }
        non_negative("shot.aim_sweep_speed", shot.aim_sweep_speed)?;
        non_negative("shot.aim_length", shot.aim_length)?;
        non_negative("shot.scrub_per_press", shot.scrub_per_press)?;
        non_negative("shot.scrub_finalize_delay", shot.scrub_finalize_delay)?;
        non_negative("shot.max_scrub", shot.max_scrub)?;
        non_negative("shot.scrub_spawn_spacing", shot.scrub_spawn_spacing)?;
        non_negative("shot.scrub_move_speed", shot.scrub_move_speed)?;
        non_negative(
            "shot.scrub_speed_scale_by_amount",
            shot.scrub_speed_scale_by_amount,
        )?;

        if !self.launcher.forward.is_finite() || self.launcher.forward.length_squared() == 0.0 {
            return Err(ConfigError::invalid(
                "launcher.forward",
                "must be a finite, non-zero axis",
            ));
        }

        let spawn = &self.spawn;
        non_negative("spawn.min_distance_from_player", spawn.min_distance_from_player)?;
        if !(0.0..0.5).contains(&spawn.viewport_margin) {
            return Err(ConfigError::invalid(
                "spawn.viewport_margin",
                format!("{} is outside [0, 0.5)", spawn.viewport_margin),
            ));
        }
        if spawn.min_pucks > spawn.max_pucks {
            return Err(ConfigError::invalid(
                "spawn.min_pucks",
                format!("{} is above max_pucks {}", spawn.min_pucks, spawn.max_pucks),
            ));
        }
        non_negative("spawn.puck_spawn_radius_min", spawn.puck_spawn_radius_min)?;
        non_negative("spawn.puck_spawn_radius_max", spawn.puck_spawn_radius_max)?;
        if spawn.puck_spawn_radius_min > spawn.puck_spawn_radius_max {
            return Err(ConfigError::invalid(
                "spawn.puck_spawn_radius_min",
                "is above puck_spawn_radius_max",
            ));
        }

        let monitor = &self.monitor;
        non_negative("monitor.success_radius", monitor.success_radius)?;
        non_negative(
            "monitor.stop_velocity_threshold",
            monitor.stop_velocity_threshold,
        )?;
        if !(monitor.check_interval.is_finite() && monitor.check_interval > 0.0) {
            return Err(ConfigError::invalid(
                "monitor.check_interval",
                "must be a positive number of seconds",
            ));
        }
        non_negative("monitor.respawn_delay", monitor.respawn_delay)?;
        if monitor.goal_hits == 0 {
            return Err(ConfigError::invalid("monitor.goal_hits", "must be at least 1"));
        }

        if let Some(camera) = &self.camera {
            if !camera.center.is_finite()
                || !camera.half_extents.is_finite()
                || camera.half_extents.min_element() <= 0.0
            {
                return Err(ConfigError::invalid(
                    "camera",
                    "half extents must be finite and positive",
                ));
            }
        }

        if let Some(puck) = &self.templates.puck {
            if !(puck.mass.is_finite() && puck.mass > 0.0) {
                return Err(ConfigError::invalid(
                    "templates.puck.mass",
                    "must be positive",
                ));
            }
            non_negative("templates.puck.linear_damping", puck.linear_damping)?;
        }
        if let Some(marker) = &self.templates.scrub_marker {
            non_negative("templates.scrub_marker.lifetime_secs", marker.lifetime_secs)?;
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}
