//! # ExtDev Verify Command
//!
//! File: cli/src/commands/verify.rs
//!
//! `extdev verify` re-runs the post-install check against the currently
//! installed version (`<publisher>.<name>-<version>`) without rebuilding
//! anything. Like the deploy step, missing files are reported but do not
//! change the exit code.
//!
use crate::{
    commands::deploy::Deployer,
    common::process::{SystemProcesses, SystemRunner},
    core::{config, error::Result},
    GlobalArgs,
};
use clap::Parser;
use tracing::info;

/// Arguments for `extdev verify`.
#[derive(Parser, Debug, Default)]
#[command(about = "Check the installed extension for its expected files")]
pub struct VerifyArgs {}

pub async fn handle_verify(_args: VerifyArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling verify command...");
    let cfg = config::load_config(global.config.as_deref())?;
    let deployer = Deployer::new(&cfg, global.logger(), &SystemProcesses, &SystemRunner);
    let target = cfg.target_dir();
    if !target.is_dir() {
        deployer.log.warning(&format!(
            "{} is not installed at {}",
            cfg.extension_id(),
            target.display()
        ));
    }
    let report = deployer.verify(&target);
    println!(
        "{} of {} expected file(s) present.",
        report.present.len(),
        report.present.len() + report.missing.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_args_parsing() {
        assert!(VerifyArgs::try_parse_from(["verify"]).is_ok());
    }
}
