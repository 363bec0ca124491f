//! # Deploy Step: Summary
//!
//! File: cli/src/commands/deploy/summary.rs
//!
//! Final hints printed after a deploy. They point at the places a developer
//! looks when a freshly installed extension does not activate.
//!
use super::Deployer;
use std::path::Path;

impl Deployer<'_> {
    /// Troubleshooting hints, in print order.
    pub fn summary_hints(&self, installed_dir: &Path) -> Vec<String> {
        let editor = &self.config.editor.launch_command;
        vec![
            format!("Installed to: {}", installed_dir.display()),
            "If the extension does not activate, run 'Developer: Reload Window' from the command palette.".to_string(),
            "Activation errors appear in View > Output under 'Extension Host'.".to_string(),
            "Help > Toggle Developer Tools shows console errors from the extension.".to_string(),
            format!(
                "Confirm the install with: {} --list-extensions --show-versions",
                editor
            ),
        ]
    }

    pub fn print_summary(&self, installed_dir: &Path) {
        println!();
        self.log
            .success(&format!("{} deployed", self.config.extension_id()));
        for hint in self.summary_hints(installed_dir) {
            println!("  - {}", hint);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::deploy::tests::{Fixture, Recorder};

    #[test]
    fn test_summary_hints_mention_install_path_and_editor() {
        let fx = Fixture::new();
        let recorder = Recorder::default();
        let target = fx.config.target_dir();
        let hints = fx.deployer(&recorder).summary_hints(&target);

        assert!(hints[0].contains(&target.display().to_string()));
        assert!(hints
            .last()
            .unwrap()
            .starts_with("Confirm the install with: code"));
    }
}
