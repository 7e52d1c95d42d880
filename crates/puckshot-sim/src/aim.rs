//! Aim sweep: the oscillating aim angle while the shot controller is Aiming.
//!
//! Pure data plus arithmetic; no ECS dependency.

use puckshot_core::config::ShotConfig;

/// Oscillating aim angle bounded by `[min_angle, max_angle]` (degrees).
#[derive(Debug, Clone)]
pub struct AimSweeper {
    pub current_angle: f64,
    /// +1 sweeping toward `max_angle`, -1 toward `min_angle`.
    pub direction_sign: i8,
    min_angle: f64,
    max_angle: f64,
    /// Degrees per second.
    sweep_speed: f64,
}

impl AimSweeper {
    pub fn new(config: &ShotConfig) -> Self {
        Self {
            current_angle: config.aim_midpoint(),
            direction_sign: 1,
            min_angle: config.aim_min_angle,
            max_angle: config.aim_max_angle,
            sweep_speed: config.aim_sweep_speed,
        }
    }

    /// Start a new sweep from the midpoint, heading toward `max_angle`.
    pub fn reset(&mut self) {
        self.current_angle = (self.min_angle + self.max_angle) * 0.5;
        self.direction_sign = 1;
    }

    /// Advance the sweep by `dt` seconds. Crossing a bound clamps to it and
    /// reverses direction. Returns true when the direction flipped.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.current_angle += self.sweep_speed * dt * f64::from(self.direction_sign);

        if self.current_angle > self.max_angle {
            self.current_angle = self.max_angle;
            self.direction_sign = -1;
            true
        } else if self.current_angle < self.min_angle {
            self.current_angle = self.min_angle;
            self.direction_sign = 1;
            true
        } else {
            false
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_angle, self.max_angle)
    }
}
