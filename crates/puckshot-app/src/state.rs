//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use puckshot_core::commands::PlayerCommand;
use puckshot_core::state::GameStateSnapshot;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Throw the current engine away and start a fresh game.
    Restart,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` for handles that only exist once the loop runs
#[derive(Default)]
pub struct AppState {
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: SharedSnapshot,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the game loop thread has been started.
    pub fn running(&self) -> bool {
        self.command_tx.lock().is_ok_and(|tx| tx.is_some())
    }
}
