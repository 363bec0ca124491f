//! # Deploy Steps: Editor Lifecycle
//!
//! File: cli/src/commands/deploy/editor.rs
//!
//! Stops the running editor before files are replaced and relaunches it once
//! the new build is installed. Neither step can fail the pipeline: a missing
//! process, a process that exits on its own, or a failed relaunch are all
//! reported as warnings.
//!
use super::Deployer;
use std::time::Duration;

impl Deployer<'_> {
    /// Kills the editor if it is running and waits for the OS to release it.
    ///
    /// Returns `true` when a running editor was found.
    pub async fn stop_editor(&self) -> bool {
        let name = &self.config.editor.process_name;
        self.log
            .status(&format!("Looking for running '{}' processes...", name));

        let handle = match self.processes.find(name) {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                self.log
                    .warning(&format!("'{}' is not running, nothing to stop", name));
                return false;
            }
            Err(e) => {
                self.log
                    .warning(&format!("Could not query running processes: {:#}", e));
                return false;
            }
        };

        self.log.status(&format!(
            "Stopping '{}' (pid {})",
            name,
            handle
                .pids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        match self.processes.stop(&handle) {
            Ok(()) => self.log.success(&format!("Stopped '{}'", name)),
            Err(e) => self
                .log
                .warning(&format!("Could not stop '{}': {:#}", name, e)),
        }

        let delay = self.config.editor.shutdown_delay_ms;
        if delay > 0 {
            self.log
                .debug(&format!("Waiting {} ms for the editor to exit", delay));
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        true
    }

    /// Launches the editor detached. Returns `true` if the launch succeeded.
    pub fn restart_editor(&self) -> bool {
        let editor = &self.config.editor;
        self.log
            .status(&format!("Starting '{}'...", editor.launch_command));
        match self
            .processes
            .start(&editor.launch_command, &editor.launch_args)
        {
            Ok(()) => {
                self.log
                    .success(&format!("Launched '{}'", editor.launch_command));
                true
            }
            Err(e) => {
                self.log.warning(&format!(
                    "Could not launch '{}': {:#}",
                    editor.launch_command, e
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::deploy::Deployer;
    use crate::commands::deploy::tests::{Event, Fixture, Recorder};
    use crate::common::process::{ProcessControl, ProcessHandle};
    use crate::common::ui::Logger;
    use crate::core::error::{ExtdevError, Result};

    /// Editor that is found but has already exited by the time it is killed.
    struct AlreadyGone;

    impl ProcessControl for AlreadyGone {
        fn find(&self, name: &str) -> Result<Option<ProcessHandle>> {
            Ok(Some(ProcessHandle {
                name: name.to_string(),
                pids: vec![7],
            }))
        }
        fn stop(&self, _handle: &ProcessHandle) -> Result<()> {
            Err(ExtdevError::ProcessNotFound { pid: 7 }.into())
        }
        fn start(&self, command: &str, _args: &[String]) -> Result<()> {
            anyhow::bail!("'{}' not on PATH", command)
        }
    }

    #[tokio::test]
    async fn test_stop_editor_running() {
        let fx = Fixture::new();
        let recorder = Recorder {
            running: true,
            ..Default::default()
        };
        assert!(fx.deployer(&recorder).stop_editor().await);
        assert_eq!(
            recorder.events(),
            vec![
                Event::Find("code".to_string()),
                Event::Stop("code".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_stop_editor_not_running() {
        let fx = Fixture::new();
        let recorder = Recorder::default();
        assert!(!fx.deployer(&recorder).stop_editor().await);
        assert_eq!(recorder.events(), vec![Event::Find("code".to_string())]);
    }

    #[tokio::test]
    async fn test_stop_and_restart_failures_are_not_fatal() {
        let fx = Fixture::new();
        let recorder = Recorder::default();
        let deployer = Deployer::new(&fx.config, Logger::default(), &AlreadyGone, &recorder);

        assert!(deployer.stop_editor().await);
        assert!(!deployer.restart_editor());
    }

    #[test]
    fn test_restart_editor_records_start() {
        let fx = Fixture::new();
        let recorder = Recorder::default();
        assert!(fx.deployer(&recorder).restart_editor());
        assert_eq!(recorder.events(), vec![Event::Start("code".to_string())]);
    }
}
