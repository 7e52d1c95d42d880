//! Target/progress monitor. Owns the live target, the tracked shot pucks
//! and the score, and decides when a puck has landed.
//!
//! The monitor is the single writer of its state. The shot controller reaches
//! it only through [`ShotRegistry`]; the host only through
//! [`TargetMonitor::spawn_new_target`].

use glam::DVec2;
use rand::Rng;
use tracing::{debug, info, warn};

use puckshot_core::config::{GameConfig, MonitorConfig, PuckTemplate, TargetTemplate};
use puckshot_core::constants::TIMER_EPSILON;
use puckshot_core::enums::{AlertLevel, BodyKind};
use puckshot_core::events::{EffectsSink, GameEvent};
use puckshot_core::state::{ProgressView, TargetView};
use puckshot_core::types::{BodyHandle, Viewport};

use crate::physics::{BodySpec, PhysicsWorld};
use crate::spawn::{self, Annulus, PlacementRules};

/// Narrow entry points the shot controller uses on fire.
pub trait ShotRegistry {
    /// Count one fired shot.
    fn register_shot(&mut self, effects: &mut dyn EffectsSink);
    /// Watch a player-fired puck for landing.
    fn track_projectile(&mut self, body: BodyHandle);
}

/// The single live target. Replaced on respawn, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetState {
    pub id: u32,
    pub position: DVec2,
    pub radius: f64,
}

/// Score and win state.
#[derive(Debug, Clone, Default)]
pub struct GameProgress {
    pub hits_so_far: u32,
    pub shots_fired: u32,
    pub goal_hits: u32,
    /// Terminal once set.
    pub won: bool,
}

impl GameProgress {
    pub fn hits_left(&self) -> u32 {
        self.goal_hits.saturating_sub(self.hits_so_far)
    }
}

pub struct TargetMonitor {
    config: MonitorConfig,
    rules: PlacementRules,
    aux_count_range: (u32, u32),
    aux_radius_range: (f64, f64),
    camera: Option<Viewport>,
    player: Option<DVec2>,
    target_template: Option<TargetTemplate>,
    puck_template: Option<PuckTemplate>,

    target: Option<TargetState>,
    next_target_id: u32,
    /// Player-fired pucks, in registration order.
    tracked: Vec<BodyHandle>,
    /// Decorative pucks around the target. Never evaluated for landing.
    auxiliary: Vec<BodyHandle>,
    progress: GameProgress,

    /// Seconds since the last poll.
    poll_elapsed: f64,
    /// Seconds until the scheduled respawn, if one is pending.
    pending_respawn: Option<f64>,
}

impl TargetMonitor {
    /// Build a monitor for the scene in `config`. `player` is the position
    /// new targets keep their distance from.
    pub fn new(config: &GameConfig, player: Option<DVec2>) -> Self {
        Self {
            config: config.monitor.clone(),
            rules: PlacementRules::from(&config.spawn),
            aux_count_range: (config.spawn.min_pucks, config.spawn.max_pucks),
            aux_radius_range: (
                config.spawn.puck_spawn_radius_min,
                config.spawn.puck_spawn_radius_max,
            ),
            camera: config.camera,
            player,
            target_template: config.templates.target,
            puck_template: config.templates.puck,
            target: None,
            next_target_id: 0,
            tracked: Vec::new(),
            auxiliary: Vec::new(),
            progress: GameProgress {
                goal_hits: config.monitor.goal_hits,
                ..Default::default()
            },
            poll_elapsed: 0.0,
            pending_respawn: None,
        }
    }

    pub fn target(&self) -> Option<&TargetState> {
        self.target.as_ref()
    }

    pub fn tracked(&self) -> &[BodyHandle] {
        &self.tracked
    }

    pub fn auxiliary(&self) -> &[BodyHandle] {
        &self.auxiliary
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    /// Seconds accumulated toward the next poll.
    #[cfg(test)]
    pub fn poll_elapsed(&self) -> f64 {
        self.poll_elapsed
    }

    /// Whether a respawn is scheduled.
    pub fn respawn_pending(&self) -> bool {
        self.pending_respawn.is_some()
    }

    /// Replace the current target with a freshly placed one, clearing every
    /// tracked and auxiliary puck. No-op once the game is won.
    pub fn spawn_new_target(
        &mut self,
        rng: &mut impl Rng,
        physics: &mut dyn PhysicsWorld,
        effects: &mut dyn EffectsSink,
    ) {
        if self.progress.won {
            diagnostic(
                effects,
                AlertLevel::Info,
                "game already won; target spawn skipped",
            );
            return;
        }
        let Some(template) = self.target_template else {
            diagnostic(
                effects,
                AlertLevel::Warning,
                "target template not assigned; target spawn skipped",
            );
            return;
        };

        self.pending_respawn = None;
        self.clear_pucks(physics);
        self.target = None;

        let position =
            spawn::place_target(rng, &self.rules, self.camera.as_ref(), self.player);
        self.next_target_id += 1;
        let target = TargetState {
            id: self.next_target_id,
            position,
            radius: template.radius,
        };
        self.target = Some(target);

        let auxiliary_pucks = self.spawn_auxiliary_pucks(rng, physics, effects, position);

        // Restart polling for the new target.
        self.poll_elapsed = 0.0;

        info!(
            target_id = target.id,
            x = position.x,
            y = position.y,
            auxiliary_pucks,
            "target spawned"
        );
        effects.emit(GameEvent::TargetSpawned {
            target_id: target.id,
            position,
            auxiliary_pucks,
        });
    }

    fn spawn_auxiliary_pucks(
        &mut self,
        rng: &mut impl Rng,
        physics: &mut dyn PhysicsWorld,
        effects: &mut dyn EffectsSink,
        center: DVec2,
    ) -> u32 {
        let Some(template) = self.puck_template else {
            diagnostic(
                effects,
                AlertLevel::Warning,
                "puck template not assigned; auxiliary pucks skipped",
            );
            return 0;
        };

        let (min_pucks, max_pucks) = self.aux_count_range;
        let count = rng.gen_range(min_pucks..=max_pucks);
        let annulus = Annulus {
            center,
            radius_min: self.aux_radius_range.0,
            radius_max: self.aux_radius_range.1,
        };
        for index in 0..count {
            let position =
                spawn::place_auxiliary(rng, &annulus, &self.rules, self.camera.as_ref(), index);
            let body = physics.spawn_body(BodySpec::puck(
                BodyKind::AuxiliaryPuck,
                position,
                &template,
            ));
            self.auxiliary.push(body);
        }
        count
    }

    /// Advance the respawn delay and the poll interval by `dt` seconds,
    /// polling when the interval has elapsed.
    pub fn update(
        &mut self,
        dt: f64,
        rng: &mut impl Rng,
        physics: &mut dyn PhysicsWorld,
        effects: &mut dyn EffectsSink,
    ) {
        if let Some(remaining) = self.pending_respawn.as_mut() {
            *remaining -= dt;
            if *remaining <= TIMER_EPSILON {
                self.pending_respawn = None;
                self.spawn_new_target(rng, physics, effects);
                return;
            }
        }

        if self.target.is_none() {
            return;
        }

        let interval = self.config.check_interval;
        self.poll_elapsed += dt;
        if self.poll_elapsed + TIMER_EPSILON >= interval {
            // At most one poll per tick; intervals skipped by a long tick are dropped.
            self.poll_elapsed = if interval > 0.0 {
                (self.poll_elapsed - interval).max(0.0) % interval
            } else {
                0.0
            };
            self.poll(physics, effects);
        }
    }

    /// Evaluate tracked pucks in registration order. The first one resting
    /// inside the success radius resolves a hit and ends the poll. Pucks
    /// whose bodies are gone are dropped. Returns the landed puck.
    pub fn poll(
        &mut self,
        physics: &mut dyn PhysicsWorld,
        effects: &mut dyn EffectsSink,
    ) -> Option<BodyHandle> {
        let target = self.target?;
        if self.tracked.is_empty() {
            return None;
        }

        let mut landed = None;
        let mut stale = Vec::new();
        for &body in &self.tracked {
            let Some(position) = physics.position(body) else {
                stale.push(body);
                continue;
            };
            if position.distance(target.position) > self.config.success_radius {
                continue;
            }
            // A body without velocity counts as stopped.
            let stopped = physics
                .velocity(body)
                .map_or(true, |v| v.length() <= self.config.stop_velocity_threshold);
            if stopped {
                landed = Some(body);
                break;
            }
        }

        if !stale.is_empty() {
            debug!(count = stale.len(), "dropping vanished tracked pucks");
            self.tracked.retain(|body| !stale.contains(body));
        }

        if landed.is_some() {
            self.resolve_hit(target, physics, effects);
        }
        landed
    }

    fn resolve_hit(
        &mut self,
        target: TargetState,
        physics: &mut dyn PhysicsWorld,
        effects: &mut dyn EffectsSink,
    ) {
        self.progress.hits_so_far += 1;
        info!(
            target_id = target.id,
            hits = self.progress.hits_so_far,
            goal = self.progress.goal_hits,
            "target hit"
        );
        effects.emit(GameEvent::TargetHit {
            target_id: target.id,
            hits_so_far: self.progress.hits_so_far,
        });
        self.emit_progress(effects);

        self.clear_pucks(physics);
        self.target = None;
        self.poll_elapsed = 0.0;

        if self.progress.hits_so_far >= self.progress.goal_hits {
            self.progress.won = true;
            info!(shots = self.progress.shots_fired, "goal reached");
            effects.emit(GameEvent::GameWon {
                shots_fired: self.progress.shots_fired,
            });
            return;
        }

        self.pending_respawn = Some(self.config.respawn_delay);
    }

    /// Despawn every tracked and auxiliary puck.
    fn clear_pucks(&mut self, physics: &mut dyn PhysicsWorld) {
        for body in self.tracked.drain(..).chain(self.auxiliary.drain(..)) {
            physics.despawn(body);
        }
    }

    fn emit_progress(&self, effects: &mut dyn EffectsSink) {
        effects.emit(GameEvent::ProgressChanged {
            hits_left: self.progress.hits_left(),
            shots_fired: self.progress.shots_fired,
        });
    }

    pub fn target_view(&self) -> Option<TargetView> {
        self.target.map(|t| TargetView {
            target_id: t.id,
            position: t.position,
            radius: t.radius,
        })
    }

    pub fn progress_view(&self) -> ProgressView {
        ProgressView {
            hits: self.progress.hits_so_far,
            hits_left: self.progress.hits_left(),
            shots_fired: self.progress.shots_fired,
            goal_hits: self.progress.goal_hits,
            won: self.progress.won,
        }
    }
}

impl ShotRegistry for TargetMonitor {
    fn register_shot(&mut self, effects: &mut dyn EffectsSink) {
        if self.progress.won {
            return;
        }
        self.progress.shots_fired += 1;
        self.emit_progress(effects);
    }

    fn track_projectile(&mut self, body: BodyHandle) {
        if self.progress.won || self.tracked.contains(&body) {
            return;
        }
        self.tracked.push(body);
    }
}

fn diagnostic(effects: &mut dyn EffectsSink, level: AlertLevel, message: &str) {
    match level {
        AlertLevel::Info => debug!("{message}"),
        AlertLevel::Warning => warn!("{message}"),
    }
    effects.emit(GameEvent::Diagnostic {
        level,
        message: message.to_string(),
    });
}
