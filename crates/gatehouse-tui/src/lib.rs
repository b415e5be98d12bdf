//! Full-screen TUI implementation for Gatehouse.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
pub use features::{home, login};
use gatehouse_core::session::{FileStore, ViewController};
pub use runtime::TuiRuntime;

/// Runs the login app until the user quits.
///
/// # Errors
/// Returns an error if stderr is not a terminal or terminal I/O fails.
pub fn run_app(session_path: &Path, debounce: Duration) -> Result<()> {
    // The app requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Gatehouse requires a terminal.\n\
             Use `gatehouse session show` to inspect the session non-interactively."
        );
    }

    let controller = ViewController::initialize(FileStore::new(session_path));

    let mut runtime = TuiRuntime::new(controller, debounce)?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
