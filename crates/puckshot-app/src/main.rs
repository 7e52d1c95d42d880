use std::error::Error;
use std::io::{self, BufRead};

use tracing::{info, warn};

use puckshot_app::console::{self, ConsoleAction};
use puckshot_app::state::AppState;
use puckshot_core::config::GameConfig;

const USAGE: &str = "Enter/space: charge   r: new target   p/c: pause/resume   \
                     t <scale>: time scale   s: snapshot   restart: new round   q: quit";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            GameConfig::from_json_file(&path)?
        }
        None => GameConfig::default(),
    };

    let state = AppState::new();
    console::start_simulation(&state, config)?;
    info!("{USAGE}");

    for line in io::stdin().lock().lines() {
        let line = line?;
        match console::parse_line(&line) {
            Some(ConsoleAction::Player(command)) => console::send_command(&state, command)?,
            Some(ConsoleAction::PrintSnapshot) => {
                if let Some(snapshot) = console::get_snapshot(&state)? {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }
            }
            Some(ConsoleAction::Restart) => console::restart_simulation(&state)?,
            Some(ConsoleAction::Quit) => break,
            None => warn!(input = %line.trim(), "unrecognised input. {USAGE}"),
        }
    }

    console::stop_simulation(&state)?;
    Ok(())
}
