//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for synchronous polling and HUD lines are logged as progress changes.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use puckshot_core::commands::PlayerCommand;
use puckshot_core::config::GameConfig;
use puckshot_core::constants::TICK_RATE;
use puckshot_core::enums::GamePhase;
use puckshot_core::events::GameEvent;
use puckshot_sim::SimulationEngine;

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the console to use, and the thread handle.
pub fn spawn_game_loop(
    config: GameConfig,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("puckshot-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Owns the engine and its restarts. A restarted game reseeds from the
/// configured seed plus the restart count, so each round places targets
/// differently while staying reproducible.
pub struct GameSession {
    config: GameConfig,
    restarts: u64,
    engine: SimulationEngine,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let engine = SimulationEngine::new(config.clone());
        Self {
            config,
            restarts: 0,
            engine,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Replace the engine with a fresh one.
    pub fn restart(&mut self) {
        self.restarts += 1;
        let config = GameConfig {
            seed: self.config.seed.wrapping_add(self.restarts),
            ..self.config.clone()
        };
        info!(round = self.restarts + 1, "restarting");
        self.engine = SimulationEngine::new(config);
    }

    /// Forward a player command. Once the game is won, any input starts a
    /// new round instead.
    pub fn handle(&mut self, command: PlayerCommand) {
        if self.engine.phase() == GamePhase::Won {
            self.restart();
            return;
        }
        self.engine.queue_command(command);
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: GameConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) {
    let mut session = GameSession::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => session.handle(cmd),
                Ok(GameLoopCommand::Restart) => session.restart(),
                Ok(GameLoopCommand::Shutdown) => {
                    debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause and win internally)
        let snapshot = session.engine.tick();

        // 3. HUD output
        report_events(&snapshot.events);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let time_scale = session.engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// HUD text for a tick's events, in emission order.
pub fn hud_lines(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::ProgressChanged {
                hits_left,
                shots_fired,
            } => Some(format!("Targets left: {hits_left}   Shots: {shots_fired}")),
            GameEvent::GameWon { shots_fired } => Some(format!(
                "All targets hit in {shots_fired} shots! Press any key to play again."
            )),
            _ => None,
        })
        .collect()
}

fn report_events(events: &[GameEvent]) {
    for line in hud_lines(events) {
        info!(target: "puckshot::hud", "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Win a one-hit game by firing once and parking the puck on the target.
    fn land_on_target(session: &mut GameSession) {
        for _ in 0..3 {
            session.handle(PlayerCommand::ChargePress);
            session.engine.tick();
        }
        for _ in 0..(TICK_RATE * 2) {
            session.engine.tick();
        }
        let monitor = session.engine.monitor();
        let puck = monitor.tracked()[0];
        let target = monitor.target().unwrap().position;
        session
            .engine
            .physics_mut()
            .set_motion(puck, target, Default::default());
        for _ in 0..20 {
            session.engine.tick();
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::ChargePress))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Restart).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 4);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::ChargePress)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Restart));
        assert!(matches!(commands[3], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut session = GameSession::new(GameConfig::default());
        for _ in 0..50 {
            session.engine.tick();
        }

        let snapshot = session.engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut session = GameSession::new(GameConfig::default());
        let snap = session.engine.tick();
        assert_eq!(snap.phase, GamePhase::Active);

        session.handle(PlayerCommand::Pause);
        let snap = session.engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_tick = snap.time.tick;

        let snap = session.engine.tick();
        assert_eq!(snap.time.tick, paused_tick);

        session.handle(PlayerCommand::Resume);
        let snap = session.engine.tick();
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.tick > paused_tick);
    }

    #[test]
    fn test_any_input_after_win_restarts() {
        let mut config = GameConfig::default();
        config.monitor.goal_hits = 1;
        let mut session = GameSession::new(config);
        land_on_target(&mut session);
        assert_eq!(session.engine().phase(), GamePhase::Won);

        session.handle(PlayerCommand::ChargePress);
        assert_eq!(session.restarts(), 1);
        assert_eq!(session.engine().phase(), GamePhase::Active);
        assert_eq!(session.engine().config().seed, 43);
        assert_eq!(session.engine().monitor().progress().hits_so_far, 0);
        assert_eq!(session.engine().time().tick, 0);
    }

    #[test]
    fn test_restart_mid_round_reseeds() {
        let mut session = GameSession::new(GameConfig::default());
        for _ in 0..30 {
            session.engine.tick();
        }
        let first_target = session.engine().monitor().target().unwrap().position;

        session.restart();
        assert_eq!(session.restarts(), 1);
        assert_eq!(session.engine().time().tick, 0);
        assert_eq!(session.engine().config().seed, 43);
        assert_ne!(
            session.engine().monitor().target().unwrap().position,
            first_target
        );
    }

    #[test]
    fn test_hud_lines() {
        let lines = hud_lines(&[
            GameEvent::AimIndicatorVisible { visible: true },
            GameEvent::ProgressChanged {
                hits_left: 4,
                shots_fired: 2,
            },
            GameEvent::GameWon { shots_fired: 7 },
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Targets left: 4   Shots: 2");
        assert!(lines[1].contains("7 shots"));
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let latest: SharedSnapshot = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(GameConfig::default(), latest.clone()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while latest.lock().unwrap().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(latest.lock().unwrap().is_some());

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
