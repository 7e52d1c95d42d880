//! Console command handlers.
//!
//! Maps typed lines to actions and bridges them to the game loop thread via
//! channels.

use puckshot_core::commands::PlayerCommand;
use puckshot_core::config::GameConfig;
use puckshot_core::state::GameStateSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// What a console line asks for.
#[derive(Debug, Clone)]
pub enum ConsoleAction {
    Player(PlayerCommand),
    PrintSnapshot,
    Restart,
    Quit,
}

/// Parse one input line. An empty line (just Enter) is a charge press.
/// Returns `None` for unrecognised input.
pub fn parse_line(line: &str) -> Option<ConsoleAction> {
    let line = line.trim().to_ascii_lowercase();
    let mut words = line.split_whitespace();
    let action = match words.next() {
        None | Some("space") => ConsoleAction::Player(PlayerCommand::ChargePress),
        Some("r") => ConsoleAction::Player(PlayerCommand::SpawnNewTarget),
        Some("p") => ConsoleAction::Player(PlayerCommand::Pause),
        Some("c") => ConsoleAction::Player(PlayerCommand::Resume),
        Some("t") => {
            let scale = words.next()?.parse().ok()?;
            ConsoleAction::Player(PlayerCommand::SetTimeScale { scale })
        }
        Some("s") => ConsoleAction::PrintSnapshot,
        Some("restart") => ConsoleAction::Restart,
        Some("q") | Some("quit") => ConsoleAction::Quit,
        Some(_) => return None,
    };
    Some(action)
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: GameConfig) -> Result<(), String> {
    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    if tx_lock.is_some() {
        return Err("Simulation already running".into());
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
        .map_err(|e| format!("Failed to spawn game loop: {}", e))?;

    *tx_lock = Some(cmd_tx);
    let mut handle_lock = state.loop_handle.lock().map_err(|e| e.to_string())?;
    *handle_lock = Some(handle);
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), String> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Throw away the current round and start a fresh one.
pub fn restart_simulation(state: &AppState) -> Result<(), String> {
    send(state, GameLoopCommand::Restart)
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to finish.
pub fn stop_simulation(state: &AppState) -> Result<(), String> {
    send(state, GameLoopCommand::Shutdown)?;
    state
        .command_tx
        .lock()
        .map_err(|e| e.to_string())?
        .take();

    let handle = state
        .loop_handle
        .lock()
        .map_err(|e| e.to_string())?
        .take();
    if let Some(handle) = handle {
        handle
            .join()
            .map_err(|_| "Game loop thread panicked".to_string())?;
    }
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), String> {
    let tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(command)
            .map_err(|e| format!("Failed to send command: {}", e)),
        None => Err("Simulation not started".into()),
    }
}
