//! # ExtDev Uninstall Command
//!
//! File: cli/src/commands/uninstall.rs
//!
//! `extdev uninstall` runs only the removal step of the deploy pipeline: every
//! installed copy of the extension (`<publisher>.<name>-<version>`) is deleted from the
//! extensions directory. The editor is left alone, so it is best run while the
//! editor is closed.
//!
use crate::{
    commands::deploy::Deployer,
    common::process::{SystemProcesses, SystemRunner},
    core::{config, error::Result},
    GlobalArgs,
};
use clap::Parser;
use tracing::info;

/// Arguments for `extdev uninstall`.
#[derive(Parser, Debug, Default)]
#[command(about = "Remove installed copies of the extension")]
pub struct UninstallArgs {}

pub async fn handle_uninstall(_args: UninstallArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling uninstall command...");
    let cfg = config::load_config(global.config.as_deref())?;
    let deployer = Deployer::new(&cfg, global.logger(), &SystemProcesses, &SystemRunner);
    let removed = deployer.remove_existing()?;
    println!("Uninstall finished ({} removed).", removed.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninstall_args_parsing() {
        assert!(UninstallArgs::try_parse_from(["uninstall"]).is_ok());
        assert!(UninstallArgs::try_parse_from(["uninstall", "--force"]).is_err());
    }
}
