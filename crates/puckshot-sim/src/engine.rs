//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the physics world, the shot controller and the
//! target monitor, processes player commands, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use puckshot_core::commands::PlayerCommand;
use puckshot_core::config::GameConfig;
use puckshot_core::constants::MAX_TIME_SCALE;
use puckshot_core::enums::GamePhase;
use puckshot_core::error::ConfigError;
use puckshot_core::events::GameEvent;
use puckshot_core::state::GameStateSnapshot;
use puckshot_core::types::SimTime;

use crate::monitor::TargetMonitor;
use crate::physics::SandboxPhysics;
use crate::shot::{ShotContext, ShotController};
use crate::systems;

/// The simulation engine. Owns the physics world and all game state.
pub struct SimulationEngine {
    config: GameConfig,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    physics: SandboxPhysics,
    shot: ShotController,
    monitor: TargetMonitor,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine for the given config. Places the first target
    /// immediately when `monitor.spawn_on_start` is set.
    pub fn new(config: GameConfig) -> Self {
        let shot = ShotController::new(&config);
        let monitor = TargetMonitor::new(&config, Some(config.launcher.position));
        let mut engine = Self {
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: 1.0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            physics: SandboxPhysics::new(),
            shot,
            monitor,
            events: Vec::new(),
            config,
        };

        info!(seed = engine.config.seed, "simulation started");
        if engine.config.monitor.spawn_on_start {
            engine.spawn_new_target();
        }
        engine
    }

    /// Validate `config` before building the engine.
    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let charge_pressed = self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(charge_pressed);
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.physics.world(),
            &self.time,
            self.phase,
            &self.shot,
            &self.monitor,
            events,
        )
    }

    /// Drain the command queue. Returns whether a charge press arrived.
    fn process_commands(&mut self) -> bool {
        let mut charge_pressed = false;
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                PlayerCommand::ChargePress => {
                    charge_pressed |= self.phase == GamePhase::Active;
                }
                PlayerCommand::SpawnNewTarget => {
                    if self.phase == GamePhase::Active {
                        self.spawn_new_target();
                    }
                }
                PlayerCommand::SetTimeScale { scale } => {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
                PlayerCommand::Pause => {
                    if self.phase == GamePhase::Active {
                        self.phase = GamePhase::Paused;
                        debug!("paused");
                    }
                }
                PlayerCommand::Resume => {
                    if self.phase == GamePhase::Paused {
                        self.phase = GamePhase::Active;
                        debug!("resumed");
                    }
                }
            }
        }
        charge_pressed
    }

    fn run_systems(&mut self, charge_pressed: bool) {
        let dt = self.time.dt();
        let mut ctx = ShotContext {
            rng: &mut self.rng,
            physics: &mut self.physics,
            registry: &mut self.monitor,
            effects: &mut self.events,
        };
        self.shot
            .update(charge_pressed, self.time.elapsed_secs, dt, &mut ctx);

        self.physics.step(dt);
        self.monitor
            .update(dt, &mut self.rng, &mut self.physics, &mut self.events);

        if self.monitor.progress().won {
            self.phase = GamePhase::Won;
        }
    }

    fn spawn_new_target(&mut self) {
        self.monitor
            .spawn_new_target(&mut self.rng, &mut self.physics, &mut self.events);
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn shot(&self) -> &ShotController {
        &self.shot
    }

    pub fn monitor(&self) -> &TargetMonitor {
        &self.monitor
    }

    /// Get a read-only reference to the physics world.
    pub fn physics(&self) -> &SandboxPhysics {
        &self.physics
    }

    /// Mutable physics access, for scripted scenes and tests that place
    /// pucks directly.
    pub fn physics_mut(&mut self) -> &mut SandboxPhysics {
        &mut self.physics
    }
}
