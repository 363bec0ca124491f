//! # Deploy Step: Verification
//!
//! File: cli/src/commands/deploy/verify.rs
//!
//! Checks that the installed directory contains the files the editor needs to
//! load the extension (by default `extension.js` and `package.json`). Each
//! missing file is logged at error level on its own; verification never fails
//! the run.
//!
use super::Deployer;
use std::path::Path;

/// Which expected files were found in the installed directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

impl VerifyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl Deployer<'_> {
    /// Looks for each expected file under `installed_dir`.
    pub fn verify(&self, installed_dir: &Path) -> VerifyReport {
        self.log
            .status(&format!("Verifying {}", installed_dir.display()));
        let mut report = VerifyReport::default();

        for file in &self.config.extension.expected_files {
            if installed_dir.join(file).is_file() {
                self.log.debug(&format!("Found {}", file));
                report.present.push(file.clone());
            } else {
                self.log
                    .error(&format!("Missing expected file: {}", file));
                report.missing.push(file.clone());
            }
        }

        if report.is_complete() {
            self.log.success("All expected files are present");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::deploy::tests::{Fixture, Recorder};
    use std::fs;

    #[test]
    fn test_verify_both_present() {
        let fx = Fixture::new();
        let dir = fx.config.target_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("extension.js"), "js").unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
        let recorder = Recorder::default();

        let report = fx.deployer(&recorder).verify(&dir);
        assert!(report.is_complete());
        assert_eq!(report.present, vec!["extension.js", "package.json"]);
    }

    #[test]
    fn test_verify_reports_each_missing_file_independently() {
        let fx = Fixture::new();
        let dir = fx.config.target_dir();
        fs::create_dir_all(&dir).unwrap();
        let recorder = Recorder::default();

        fs::write(dir.join("package.json"), "{}").unwrap();
        let report = fx.deployer(&recorder).verify(&dir);
        assert_eq!(report.missing, vec!["extension.js"]);
        assert_eq!(report.present, vec!["package.json"]);

        fs::remove_file(dir.join("package.json")).unwrap();
        fs::write(dir.join("extension.js"), "js").unwrap();
        let report = fx.deployer(&recorder).verify(&dir);
        assert_eq!(report.missing, vec!["package.json"]);

        fs::remove_file(dir.join("extension.js")).unwrap();
        let report = fx.deployer(&recorder).verify(&dir);
        assert_eq!(report.missing, vec!["extension.js", "package.json"]);
        assert!(report.present.is_empty());
    }

    #[test]
    fn test_verify_directory_named_like_file_is_missing() {
        let fx = Fixture::new();
        let dir = fx.config.target_dir();
        fs::create_dir_all(dir.join("extension.js")).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
        let recorder = Recorder::default();

        let report = fx.deployer(&recorder).verify(&dir);
        assert_eq!(report.missing, vec!["extension.js"]);
    }
}
