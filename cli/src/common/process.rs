//! # ExtDev Process Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Everything ExtDev does to other processes goes through this module:
//! finding and killing the running editor, relaunching it, and running the
//! package-manager and packaging tools with captured output.
//!
//! ## Architecture
//!
//! Two traits form the seam between the deploy pipeline and the OS:
//!
//! - **`ProcessControl`**: `find` / `stop` / `start` for the editor process.
//!   `SystemProcesses` implements it with `pgrep` and `kill` on Unix and
//!   `tasklist` and `taskkill` on Windows.
//! - **`CommandRunner`**: runs a program to completion in a working directory
//!   and returns a `CommandOutput`. `SystemRunner` implements it with
//!   `std::process::Command`.
//!
//! On Windows, programs are launched through `cmd /C` so that `.cmd` shims
//! (`npm`, `npx`, `code`) resolve the same way they do in a shell.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandRunner, ProcessControl, SystemProcesses, SystemRunner};
//!
//! let procs = SystemProcesses;
//! if let Some(handle) = procs.find("code")? {
//!     procs.stop(&handle)?;
//! }
//! let out = SystemRunner.run("npm", &["install".to_string()], Path::new("."))?;
//! ```
//!
use crate::core::error::{ExtdevError, Result};
use anyhow::{anyhow, Context};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// A running process (or group of same-named processes) found by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub name: String,
    pub pids: Vec<u32>,
}

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Human readable exit status, e.g. `exit code 1`.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }

    /// Non-empty output lines from stdout followed by stderr.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
    }
}

/// Finding, stopping and launching the editor process.
pub trait ProcessControl {
    /// Looks up running processes whose name is exactly `name`.
    fn find(&self, name: &str) -> Result<Option<ProcessHandle>>;
    /// Forcibly terminates every process in `handle`.
    fn stop(&self, handle: &ProcessHandle) -> Result<()>;
    /// Launches `command` detached; does not wait for it.
    fn start(&self, command: &str, args: &[String]) -> Result<()>;
}

/// Runs external tools to completion.
pub trait CommandRunner {
    /// Runs `program` with `args` in `cwd`. Errors only if the program could
    /// not be started; a non-zero exit is reported through `CommandOutput`.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput>;
}

/// `ProcessControl` backed by the platform's process tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

/// `CommandRunner` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

/// Builds a `Command` for `program`, routed through `cmd /C` on Windows.
fn platform_command(program: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", program]);
        cmd
    } else {
        Command::new(program)
    }
}

impl ProcessControl for SystemProcesses {
    fn find(&self, name: &str) -> Result<Option<ProcessHandle>> {
        let output = if cfg!(windows) {
            let image = windows_image_name(name);
            Command::new("tasklist")
                .args(["/FI", &format!("IMAGENAME eq {}", image), "/FO", "CSV", "/NH"])
                .output()
                .context("Failed to execute 'tasklist'")?
        } else {
            Command::new("pgrep")
                .args(["-x", name])
                .output()
                .context("Failed to execute 'pgrep'")?
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(
            "Process lookup for '{}': status={}, stdout='{}'",
            name,
            output.status,
            stdout.trim()
        );

        let pids = if cfg!(windows) {
            parse_tasklist_csv(&stdout)
        } else {
            // pgrep: 0 = matched, 1 = no match, anything else is a real failure.
            match output.status.code() {
                Some(0) | Some(1) => parse_pid_lines(&stdout),
                _ => {
                    return Err(anyhow!(ExtdevError::ExternalCommand {
                        cmd: format!("pgrep -x {}", name),
                        status: output.status.to_string(),
                        output: String::from_utf8_lossy(&output.stderr).into_owned(),
                    }))
                }
            }
        };

        if pids.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ProcessHandle {
                name: name.to_string(),
                pids,
            }))
        }
    }

    fn stop(&self, handle: &ProcessHandle) -> Result<()> {
        let mut first_error = None;
        for pid in &handle.pids {
            let pid_text = pid.to_string();
            let output = if cfg!(windows) {
                Command::new("taskkill")
                    .args(["/F", "/PID", &pid_text])
                    .output()
                    .context("Failed to execute 'taskkill'")?
            } else {
                Command::new("kill")
                    .args(["-9", &pid_text])
                    .output()
                    .context("Failed to execute 'kill'")?
            };
            if output.status.success() {
                info!("Terminated '{}' (pid {})", handle.name, pid);
            } else {
                warn!(
                    "Could not terminate pid {}: {}",
                    pid,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                first_error.get_or_insert(ExtdevError::ProcessNotFound { pid: *pid });
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn start(&self, command: &str, args: &[String]) -> Result<()> {
        let child = platform_command(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch '{}'", command))?;
        info!("Launched '{}' (pid {})", command, child.id());
        Ok(())
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        debug!("Running {} {:?} in {:?}", program, args, cwd);
        let output = platform_command(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute '{}'", program))?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// `Code` -> `Code.exe`; names that already carry `.exe` are left alone.
fn windows_image_name(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".exe") {
        name.to_string()
    } else {
        format!("{}.exe", name)
    }
}

/// One PID per line, as printed by `pgrep`.
fn parse_pid_lines(stdout: &str) -> Vec<u32> {
    stdout
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}

/// PIDs from `tasklist /FO CSV /NH` rows: `"Code.exe","1234","Console","1","90,000 K"`.
/// The "INFO: No tasks are running" line yields nothing.
fn parse_tasklist_csv(stdout: &str) -> Vec<u32> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split("\",\"");
            fields.next()?;
            fields.next()?.trim_matches('"').parse().ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pid_lines() {
        assert_eq!(parse_pid_lines("123\n456\n"), vec![123, 456]);
        assert!(parse_pid_lines("").is_empty());
        assert_eq!(parse_pid_lines("  77  \ngarbage\n"), vec![77]);
    }

    #[test]
    fn test_parse_tasklist_csv() {
        let out = "\"Code.exe\",\"1234\",\"Console\",\"1\",\"90,000 K\"\r\n\
                   \"Code.exe\",\"5678\",\"Console\",\"1\",\"12,000 K\"\r\n";
        assert_eq!(parse_tasklist_csv(out), vec![1234, 5678]);
        assert!(parse_tasklist_csv(
            "INFO: No tasks are running which match the specified criteria.\r\n"
        )
        .is_empty());
    }

    #[test]
    fn test_windows_image_name() {
        assert_eq!(windows_image_name("Code"), "Code.exe");
        assert_eq!(windows_image_name("Code.EXE"), "Code.EXE");
    }

    #[test]
    fn test_command_output_helpers() {
        let out = CommandOutput {
            success: false,
            code: Some(2),
            stdout: "added 10 packages\n\n".to_string(),
            stderr: "npm WARN deprecated\n".to_string(),
        };
        assert_eq!(out.status_text(), "exit code 2");
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["added 10 packages", "npm WARN deprecated"]
        );
        let signalled = CommandOutput::default();
        assert_eq!(signalled.status_text(), "terminated by signal");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = SystemRunner.run(
            "sh",
            &["-c".to_string(), "echo hello; echo oops >&2; exit 3".to_string()],
            dir.path(),
        )?;
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "oops");
        Ok(())
    }

    #[test]
    fn test_system_runner_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemRunner.run("extdev-no-such-program-xyz", &[], dir.path());
        // On Windows `cmd /C` starts fine and reports the failure via exit code.
        if cfg!(windows) {
            assert!(!result.unwrap().success);
        } else {
            assert!(result.is_err());
        }
    }
}
