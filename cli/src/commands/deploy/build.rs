//! # Deploy Steps: Dependency Update and Package Build
//!
//! File: cli/src/commands/deploy/build.rs
//!
//! Runs the configured package-manager and packaging commands in the project
//! directory. Tool output is captured; each line is logged at debug level (shown
//! with `-v`), and on failure the last lines are repeated at error level so the
//! cause is visible without re-running.
//!
//! Whether a failing tool stops the deploy is controlled by
//! `build.fail_on_error`. By default it does not: the artifact check that
//! follows is what decides whether there is anything to install.
//!
use super::Deployer;
use crate::core::error::{ExtdevError, Result};
use anyhow::anyhow;

/// Output lines repeated when a tool fails.
const FAILURE_TAIL_LINES: usize = 20;

impl Deployer<'_> {
    /// Runs the dependency install command (e.g. `npm install`).
    pub fn update_dependencies(&self) -> Result<bool> {
        self.run_tool("Dependency update", &self.config.build.install_command)
    }

    /// Runs the packaging command that produces the artifact.
    pub fn build_package(&self) -> Result<bool> {
        let built = self.run_tool("Package build", &self.config.build.package_command)?;
        if built {
            self.log.debug(&format!(
                "Expecting artifact at {}",
                self.config.artifact_path().display()
            ));
        }
        Ok(built)
    }

    /// Runs `command` and reports the outcome.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on a tolerated failure.
    fn run_tool(&self, label: &str, command: &[String]) -> Result<bool> {
        let Some((program, args)) = command.split_first() else {
            return Err(anyhow!(ExtdevError::Config(format!(
                "{} command is empty",
                label
            ))));
        };
        let display = command.join(" ");
        self.log.status(&format!("{}: {}", label, display));

        let output = match self.runner.run(program, args, &self.config.project_dir) {
            Ok(output) => output,
            Err(e) => {
                self.log
                    .error(&format!("{} could not start '{}': {:#}", label, program, e));
                return if self.config.build.fail_on_error {
                    Err(e)
                } else {
                    Ok(false)
                };
            }
        };

        for line in output.lines() {
            self.log.debug(line);
        }

        if output.success {
            self.log.success(&format!("{} finished", label));
            return Ok(true);
        }

        self.log.error(&format!(
            "{} failed ({}): {}",
            label,
            output.status_text(),
            display
        ));
        if !self.log.is_verbose() {
            let lines: Vec<&str> = output.lines().collect();
            for line in &lines[lines.len().saturating_sub(FAILURE_TAIL_LINES)..] {
                self.log.error(line);
            }
        }

        if self.config.build.fail_on_error {
            Err(anyhow!(ExtdevError::ExternalCommand {
                cmd: display,
                status: output.status_text(),
                output: format!("{}{}", output.stdout, output.stderr),
            }))
        } else {
            self.log
                .warning(&format!("Continuing despite {} failure", label.to_lowercase()));
            Ok(false)
        }
    }
}
