//! # ExtDev Deploy Command
//!
//! File: cli/src/commands/deploy/mod.rs
//!
//! ## Overview
//!
//! This module implements `extdev deploy`, the default action of the CLI. It
//! redeploys the extension under development into the local editor:
//!
//! 1. Stop the running editor (kill by process name, then wait).
//! 2. Update dependencies with the package manager.
//! 3. Build the packaged artifact.
//! 4. Remove previously installed copies of the extension.
//! 5. Install the new artifact (extract in a scratch directory, copy the payload).
//! 6. Verify the expected files are present.
//! 7. Relaunch the editor.
//! 8. Print troubleshooting hints.
//!
//! ## Architecture
//!
//! `Deployer` holds the loaded `Config`, a `Logger`, and the two OS seams from
//! `common::process` (`ProcessControl` for the editor, `CommandRunner` for
//! build tools). Each step is a method implemented in its own submodule:
//!
//! - `editor`: `stop_editor`, `restart_editor`
//! - `build`: `update_dependencies`, `build_package`
//! - `install`: `remove_existing`, `install_artifact`
//! - `verify`: `verify`
//! - `summary`: `print_summary`
//!
//! ## Error Handling
//!
//! Steps are pass/fail gates that mostly log and continue. A missing artifact
//! is always fatal and is checked right after the build, before the old copy
//! is removed, so a failed build never leaves the editor without the
//! extension. Build tool failures become fatal only with `build.fail_on_error`.
//!
//! ## Usage
//!
//! ```bash
//! extdev                 # same as `extdev deploy`
//! extdev deploy --skip-build --no-restart
//! extdev -v deploy       # show build tool output
//! ```
//!
use crate::{
    common::{
        process::{CommandRunner, ProcessControl, SystemProcesses, SystemRunner},
        ui::Logger,
    },
    core::{
        config::{self, Config},
        error::Result,
    },
    GlobalArgs,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

mod build;
mod editor;
mod install;
mod summary;
mod verify;

pub use install::InstallOutcome;
pub use verify::VerifyReport;

/// Arguments for `extdev deploy`.
#[derive(Parser, Debug, Default)]
#[command(
    about = "Rebuild, reinstall and relaunch the extension (default command)",
    long_about = "Stops the editor, runs the dependency install and packaging commands,\n\
                  removes installed copies of the extension, installs the new artifact,\n\
                  verifies it and relaunches the editor."
)]
pub struct DeployArgs {
    /// Skip the dependency update and package build; install the existing artifact.
    #[arg(long)]
    pub skip_build: bool,
    /// Do not relaunch the editor after installing.
    #[arg(long)]
    pub no_restart: bool,
}

/// What a deploy run did, step by step.
#[derive(Debug)]
pub struct DeployReport {
    /// The editor was running and a stop was attempted.
    pub editor_stopped: bool,
    pub removed: Vec<PathBuf>,
    pub install: InstallOutcome,
    pub verify: VerifyReport,
    pub editor_restarted: bool,
}

/// Runs the deploy steps against a configuration and a pair of OS seams.
pub struct Deployer<'a> {
    pub(crate) config: &'a Config,
    pub(crate) log: Logger,
    pub(crate) processes: &'a dyn ProcessControl,
    pub(crate) runner: &'a dyn CommandRunner,
}

impl<'a> Deployer<'a> {
    pub fn new(
        config: &'a Config,
        log: Logger,
        processes: &'a dyn ProcessControl,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            log,
            processes,
            runner,
        }
    }

    /// Runs the whole pipeline in order.
    pub async fn run(&self, args: &DeployArgs) -> Result<DeployReport> {
        info!(
            "Deploying {} (skip_build: {}, no_restart: {})",
            self.config.extension_id(),
            args.skip_build,
            args.no_restart
        );

        let editor_stopped = self.stop_editor().await;

        if args.skip_build {
            self.log
                .status("Skipping dependency update and package build (--skip-build)");
        } else {
            self.update_dependencies()?;
            self.build_package()?;
        }

        self.ensure_artifact()?;
        let removed = self.remove_existing()?;
        let install = self.install_artifact()?;
        let verify = self.verify(&install.target_dir);

        let editor_restarted = if args.no_restart {
            self.log.status("Not relaunching the editor (--no-restart)");
            false
        } else {
            self.restart_editor()
        };

        self.print_summary(&install.target_dir);

        Ok(DeployReport {
            editor_stopped,
            removed,
            install,
            verify,
            editor_restarted,
        })
    }
}

/// Handler for `extdev deploy`.
pub async fn handle_deploy(args: DeployArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling deploy command...");
    let cfg = config::load_config(global.config.as_deref())?;
    let processes = SystemProcesses;
    let runner = SystemRunner;
    let deployer = Deployer::new(&cfg, global.logger(), &processes, &runner);
    let report = deployer.run(&args).await?;
    info!(
        "Deploy finished: stopped={}, removed={}, installed={} file(s), missing={}, restarted={}",
        report.editor_stopped,
        report.removed.len(),
        report.install.files_installed,
        report.verify.missing.len(),
        report.editor_restarted
    );
    debug!(
        "Scratch directory {} removed",
        report.install.scratch_dir.display()
    );
    Ok(())
}
