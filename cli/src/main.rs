//! # ExtDev Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the ExtDev CLI, a tool that redeploys a locally developed
//! editor extension: stop the editor, rebuild the package, swap the installed
//! copy, and relaunch. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command is a variant of the `Commands` enum; running
//!   `extdev` without a command is the same as `extdev deploy`.
//! - Options shared by every command (`-v`, `--config`) live in `GlobalArgs`.
//! - All errors propagate here, are logged, printed, and turned into exit code 1.
//!
//! ## Examples
//!
//! ```bash
//! # Full redeploy with defaults / .extdev.toml
//! extdev
//!
//! # Reinstall the last built artifact, show debug output
//! extdev -v deploy --skip-build
//!
//! # Check what is installed
//! extdev verify
//! ```
//!
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (deploy, uninstall, verify)
mod common; // Shared utilities (archive, fs, process, ui)
mod core; // Core infrastructure (config, errors)

use common::ui::Logger;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "extdev",
    about = "ExtDev: rebuild, reinstall and relaunch a locally developed editor extension",
    long_about = "Stops the editor, rebuilds the extension package, replaces the installed copy\n\
                  and relaunches the editor. Runs `deploy` when no command is given.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    global: GlobalArgs,
}

/// Options accepted by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Increase output verbosity (-v shows tool output, -vv debug logs).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Read configuration from this file only, instead of .extdev.toml and the user config.
    #[arg(long, global = true, env = "EXTDEV_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Status logger; debug lines are shown from `-v` upward.
    pub fn logger(&self) -> Logger {
        Logger::new(self.verbose > 0)
    }
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "d")]
    Deploy(commands::deploy::DeployArgs),
    Uninstall(commands::uninstall::UninstallArgs),
    Verify(commands::verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Deploy(commands::deploy::DeployArgs::default()));
    let command_result = match command {
        Commands::Deploy(args) => commands::deploy::handle_deploy(args, &cli.global).await,
        Commands::Uninstall(args) => {
            commands::uninstall::handle_uninstall(args, &cli.global).await
        }
        Commands::Verify(args) => commands::verify::handle_verify(args, &cli.global).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
