//! Command-line front end for the simulated payment-gateway API.
//!
//! This crate provides the user-facing side of the simulator: listing and
//! documenting endpoints, editing request bodies and rendering simulated
//! responses. All behavior comes from [`paygate_sim`].
//!
//! # Example
//!
//! ```no_run
//! use paygate_console::Console;
//! use paygate_sim::{SessionState, SimulationController, SimulatorConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SimulatorConfig::default();
//!     let catalog = Arc::new(config.load_catalog()?);
//!     let controller = SimulationController::new(catalog.clone(), &config);
//!     let console = Console::new(controller, SessionState::new(catalog));
//!     paygate_console::run(console).await
//! }
//! ```

pub mod command;
pub mod console;
pub mod render;

pub use command::{Command, CommandError, CopyTarget};
pub use console::{Clipboard, Console, Reply, SystemClipboard};

use render::{RESET, YELLOW};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run the interactive console until `quit` or end of input.
pub async fn run<C: Clipboard>(mut console: Console<C>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", console.banner())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "{}", console.prompt())?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(stdout)?;
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{YELLOW}{e}{RESET}")?;
                continue;
            }
        };

        if command == Command::Run {
            writeln!(stdout, "Testing...")?;
        }
        let reply = console.execute(command).await;
        write!(stdout, "{}", reply.text)?;
        if reply.quit {
            break;
        }
    }

    Ok(())
}
