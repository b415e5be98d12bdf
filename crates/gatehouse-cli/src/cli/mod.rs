//! CLI entry and dispatch.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gatehouse_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(version)]
#[command(about = "Terminal login form with a persisted session")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet period before re-validating the form, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    debounce_ms: Option<u64>,

    /// Session store file (default: $GATEHOUSE_HOME/session.json)
    #[arg(long, value_name = "PATH", global = true)]
    session_file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect or reset the persisted session flag
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Show whether the next start is logged in
    Show,
    /// Remove the persisted flag
    Clear,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // Keep the guard alive until exit so buffered log lines are flushed.
    let _log_guard = match logging::init_file_logging(&config.log_path(), &config.logging.level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let session_path = cli
        .session_file
        .clone()
        .unwrap_or_else(|| config.session_path());

    let Some(command) = cli.command else {
        let debounce = cli
            .debounce_ms
            .map_or_else(|| config.debounce(), Duration::from_millis);
        tracing::info!(
            session = %session_path.display(),
            debounce_ms = debounce.as_millis() as u64,
            "starting"
        );
        return gatehouse_tui::run_app(&session_path, debounce);
    };

    match command {
        Commands::Session { command } => match command {
            SessionCommands::Show => {
                commands::session::show(&session_path);
                Ok(())
            }
            SessionCommands::Clear => commands::session::clear(&session_path),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
