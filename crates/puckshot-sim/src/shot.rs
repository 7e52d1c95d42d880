//! Shot controller: the Idle -> Aiming -> Scrubbing -> fire cycle.
//!
//! One charge press starts aiming, a second locks the sweeping angle, and
//! every further press builds scrub power. Once presses stop for the
//! finalize delay the puck is launched and the controller returns to Idle.

use glam::DVec2;
use rand::Rng;
use tracing::{debug, info, warn};

use puckshot_core::config::{GameConfig, Launcher, MarkerTemplate, PuckTemplate, ShotConfig};
use puckshot_core::constants::{PUCK_MASS, SCRUB_MARKER_PERP_OFFSET};
use puckshot_core::enums::{AlertLevel, BodyKind, ShotPhase};
use puckshot_core::events::{EffectsSink, GameEvent};
use puckshot_core::state::ShotView;
use puckshot_core::types::{rotate_deg, LaunchRequest};

use crate::aim::AimSweeper;
use crate::monitor::ShotRegistry;
use crate::physics::{BodySpec, PhysicsWorld};
use crate::scrub::ScrubAccumulator;

/// Collaborators the controller drives during one update.
pub struct ShotContext<'a, R: Rng> {
    pub rng: &'a mut R,
    pub physics: &'a mut dyn PhysicsWorld,
    pub registry: &'a mut dyn ShotRegistry,
    pub effects: &'a mut dyn EffectsSink,
}

pub struct ShotController {
    config: ShotConfig,
    launcher: Launcher,
    puck_template: Option<PuckTemplate>,
    marker_template: Option<MarkerTemplate>,

    phase: ShotPhase,
    aim: AimSweeper,
    scrub: ScrubAccumulator,
    /// Set while Scrubbing.
    locked_angle: Option<f64>,
    /// Aim indicator endpoints while visible.
    indicator: Option<(DVec2, DVec2)>,
}

impl ShotController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.shot.clone(),
            launcher: config.launcher.clone(),
            puck_template: config.templates.puck,
            marker_template: config.templates.scrub_marker,
            phase: ShotPhase::Idle,
            aim: AimSweeper::new(&config.shot),
            scrub: ScrubAccumulator::new(&config.shot),
            locked_angle: None,
            indicator: None,
        }
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn aim(&self) -> &AimSweeper {
        &self.aim
    }

    pub fn scrub(&self) -> &ScrubAccumulator {
        &self.scrub
    }

    pub fn locked_angle(&self) -> Option<f64> {
        self.locked_angle
    }

    pub fn indicator(&self) -> Option<(DVec2, DVec2)> {
        self.indicator
    }

    /// Advance the controller by one tick. `charge_pressed` is true when a
    /// press happened this tick; `now` is simulation time in seconds.
    /// Returns the launch request when a puck was fired.
    pub fn update<R: Rng>(
        &mut self,
        charge_pressed: bool,
        now: f64,
        dt: f64,
        ctx: &mut ShotContext<'_, R>,
    ) -> Option<LaunchRequest> {
        match self.phase {
            ShotPhase::Idle => {
                if charge_pressed {
                    self.start_aiming(ctx.effects);
                }
                None
            }
            ShotPhase::Aiming => {
                self.aim.advance(dt);
                if charge_pressed {
                    self.lock_aim();
                }
                self.move_indicator(ctx.effects);
                None
            }
            ShotPhase::Scrubbing => {
                if charge_pressed {
                    self.scrub_press(now, ctx);
                    None
                } else if self.scrub.ready_to_fire(now) {
                    self.fire(ctx)
                } else {
                    None
                }
            }
        }
    }

    fn start_aiming(&mut self, effects: &mut dyn EffectsSink) {
        self.aim.reset();
        self.phase = ShotPhase::Aiming;
        debug!(angle = self.aim.current_angle, "aiming");
        effects.emit(GameEvent::AimIndicatorVisible { visible: true });
        self.move_indicator(effects);
    }

    fn lock_aim(&mut self) {
        self.locked_angle = Some(self.aim.current_angle);
        self.scrub.reset();
        self.phase = ShotPhase::Scrubbing;
        debug!(angle = self.aim.current_angle, "aim locked");
    }

    /// The current aim angle: locked while Scrubbing, sweeping otherwise.
    fn aim_angle(&self) -> f64 {
        self.locked_angle.unwrap_or(self.aim.current_angle)
    }

    fn aim_direction(&self) -> DVec2 {
        rotate_deg(self.launcher.forward.normalize_or_zero(), self.aim_angle())
    }

    fn move_indicator(&mut self, effects: &mut dyn EffectsSink) {
        let origin = self.launcher.indicator_origin();
        let end = origin + self.aim_direction() * self.config.aim_length;
        self.indicator = Some((origin, end));
        effects.emit(GameEvent::AimIndicatorMoved { origin, end });
    }

    fn hide_indicator(&mut self, effects: &mut dyn EffectsSink) {
        self.indicator = None;
        effects.emit(GameEvent::AimIndicatorVisible { visible: false });
    }

    fn scrub_press<R: Rng>(&mut self, now: f64, ctx: &mut ShotContext<'_, R>) {
        self.scrub.press(now);
        let locked_angle = self.aim_angle();
        ctx.effects.emit(GameEvent::ChargePulse {
            press_count: self.scrub.press_count,
            amount: self.scrub.amount,
            locked_angle,
        });

        match self.marker_template {
            Some(template) => {
                let spec = self.scrub_marker(&template);
                ctx.physics.spawn_body(spec);
            }
            None => {
                let message = "scrub marker template not assigned; marker skipped";
                warn!("{message}");
                ctx.effects.emit(GameEvent::Diagnostic {
                    level: AlertLevel::Warning,
                    message: message.to_string(),
                });
            }
        }
    }

    /// Short-lived marker sliding across the aim line. Odd presses start on
    /// one side, even presses on the other.
    fn scrub_marker(&self, template: &MarkerTemplate) -> BodySpec {
        let dir = self.aim_direction();
        let perp = dir.perp();
        let side = if self.scrub.press_count % 2 == 1 { 1.0 } else { -1.0 };

        let along = (f64::from(self.scrub.press_count) * self.config.scrub_spawn_spacing)
            .min(self.config.aim_length);
        let speed = self.config.scrub_move_speed
            + self.config.scrub_speed_scale_by_amount * self.scrub.amount;

        let position = self.launcher.indicator_origin()
            + dir * along
            + perp * side * SCRUB_MARKER_PERP_OFFSET;
        let velocity = -perp * side * speed;

        BodySpec {
            kind: BodyKind::ScrubMarker,
            position,
            velocity,
            rotation: velocity.y.atan2(velocity.x).to_degrees(),
            mass: PUCK_MASS,
            linear_damping: 0.0,
            lifetime_secs: Some(template.lifetime_secs),
        }
    }

    /// Impulse magnitude for a scrub amount. The amount is clamped to 0..1
    /// so a larger `max_scrub` never adds force beyond `max_extra_force`.
    pub fn launch_force(&self, amount: f64) -> f64 {
        self.config.base_force + amount.clamp(0.0, 1.0) * self.config.max_extra_force
    }

    /// Build the launch for `angle` and `amount`, applying the configured
    /// angular spread.
    pub fn launch_request(&self, angle: f64, amount: f64, rng: &mut impl Rng) -> LaunchRequest {
        let spread = self.config.angular_randomness;
        let jitter = if spread > 0.0 {
            rng.gen_range(-spread..=spread)
        } else {
            0.0
        };
        LaunchRequest {
            origin: self.launcher.muzzle(),
            direction: rotate_deg(self.launcher.forward.normalize_or_zero(), angle + jitter),
            force: self.launch_force(amount),
        }
    }

    fn fire<R: Rng>(&mut self, ctx: &mut ShotContext<'_, R>) -> Option<LaunchRequest> {
        let fired = match self.puck_template {
            Some(template) => {
                let request = self.launch_request(self.aim_angle(), self.scrub.amount, &mut *ctx.rng);
                let body = ctx.physics.spawn_body(BodySpec::puck(
                    BodyKind::ShotPuck,
                    request.origin,
                    &template,
                ));
                ctx.physics.apply_impulse(body, request.impulse());
                ctx.registry.register_shot(ctx.effects);
                ctx.registry.track_projectile(body);

                info!(
                    angle = self.aim_angle(),
                    force = request.force,
                    presses = self.scrub.press_count,
                    "shot fired"
                );
                ctx.effects.emit(GameEvent::ShotFired { request });
                Some(request)
            }
            None => {
                let message = "puck template not assigned; shot discarded";
                warn!("{message}");
                ctx.effects.emit(GameEvent::Diagnostic {
                    level: AlertLevel::Warning,
                    message: message.to_string(),
                });
                None
            }
        };

        self.hide_indicator(ctx.effects);
        self.scrub.reset();
        self.locked_angle = None;
        self.phase = ShotPhase::Idle;
        fired
    }

    pub fn view(&self) -> ShotView {
        ShotView {
            phase: self.phase,
            current_angle: self.aim.current_angle,
            locked_angle: self.locked_angle,
            scrub_amount: self.scrub.amount,
            scrub_fill: self.scrub.fill(),
            press_count: self.scrub.press_count,
            aim_indicator: self.indicator,
        }
    }
}
