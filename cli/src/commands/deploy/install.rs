//! # Deploy Steps: Uninstall and Install
//!
//! File: cli/src/commands/deploy/install.rs
//!
//! ## Overview
//!
//! - `remove_existing` deletes every installed copy of the extension
//!   (`<publisher>.<name>-<version>` in the extensions directory), whatever its version.
//! - `install_artifact` unpacks the packaged artifact and installs its payload
//!   into `<publisher>.<name>-<version>`.
//!
//! ## Install Sequence
//!
//! 1. Fail with `ExtdevError::ArtifactMissing` if the artifact is not a file.
//!    Nothing on disk has been touched at this point.
//! 2. Create a fresh scratch directory (`extdev-XXXX`) under the scratch root.
//! 3. Copy the artifact into it as `<stem>.zip` and extract it to `unpacked/`.
//! 4. Create the target directory and copy the payload subtree (`extension/`)
//!    into it. If the archive has no such directory, the whole extraction is
//!    installed. A target directory created by a failed run is removed again.
//! 5. Delete the scratch directory. This happens whether or not 3 and 4 succeeded.
//!
use super::Deployer;
use crate::{
    common::{
        archive::extract,
        fs::{copy, io},
    },
    core::error::{ExtdevError, Result},
};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the new build went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub target_dir: PathBuf,
    /// Scratch directory used for extraction; removed by the time this is returned.
    pub scratch_dir: PathBuf,
    pub files_installed: usize,
}

impl Deployer<'_> {
    /// Fails with `ArtifactMissing` unless the configured artifact is a file.
    pub fn ensure_artifact(&self) -> Result<PathBuf> {
        let artifact = self.config.artifact_path();
        if !artifact.is_file() {
            self.log
                .error(&format!("Artifact not found: {}", artifact.display()));
            return Err(anyhow!(ExtdevError::ArtifactMissing { path: artifact }));
        }
        self.log
            .debug(&format!("Found artifact {}", artifact.display()));
        Ok(artifact)
    }

    /// Removes all installed copies of the extension. Returns the removed paths.
    pub fn remove_existing(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.config.installed_pattern();
        self.log.status(&format!(
            "Looking for installed copies of {}...",
            self.config.extension_id()
        ));
        debug!("Uninstall glob: {}", pattern);

        let matches: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid uninstall pattern: {}", pattern))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    self.log
                        .warning(&format!("Skipping unreadable path: {}", e));
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect();

        if matches.is_empty() {
            self.log.warning(&format!(
                "No installed copy of {} found in {}",
                self.config.extension_id(),
                self.config.extensions_dir().display()
            ));
            return Ok(matches);
        }

        for path in &matches {
            io::remove_dir_recursive(path)?;
            self.log.success(&format!("Removed {}", path.display()));
        }
        Ok(matches)
    }

    /// Installs the artifact into the target directory.
    pub fn install_artifact(&self) -> Result<InstallOutcome> {
        let artifact = self.ensure_artifact()?;
        let target_dir = self.config.target_dir();
        self.log.status(&format!(
            "Installing {} into {}",
            artifact.display(),
            target_dir.display()
        ));
        let target_existed = target_dir.exists();

        let scratch_root = self.config.scratch_root();
        io::ensure_dir_exists(&scratch_root)?;
        let scratch = tempfile::Builder::new()
            .prefix("extdev-")
            .tempdir_in(&scratch_root)
            .with_context(|| format!("Failed to create scratch directory in {:?}", scratch_root))?;
        let scratch_dir = scratch.path().to_path_buf();
        self.log
            .debug(&format!("Using scratch directory {}", scratch_dir.display()));

        let unpacked = self.unpack_payload(&artifact, &scratch_dir, &target_dir);
        let cleanup = scratch.close();
        if unpacked.is_err() && !target_existed && target_dir.is_dir() {
            if let Err(e) = io::remove_dir_recursive(&target_dir) {
                self.log.warning(&format!(
                    "Could not remove incomplete install {}: {}",
                    target_dir.display(),
                    e
                ));
            }
        }
        let files_installed = unpacked?;
        if let Err(e) = cleanup {
            self.log.warning(&format!(
                "Could not remove scratch directory {}: {}",
                scratch_dir.display(),
                e
            ));
        }

        self.log.success(&format!(
            "Installed {} file(s) into {}",
            files_installed,
            target_dir.display()
        ));
        Ok(InstallOutcome {
            target_dir,
            scratch_dir,
            files_installed,
        })
    }

    fn unpack_payload(&self, artifact: &Path, scratch: &Path, target: &Path) -> Result<usize> {
        let stem = artifact
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string());
        let archive = scratch.join(format!("{}.zip", stem));
        io::copy_file(artifact, &archive)?;

        let unpacked = scratch.join("unpacked");
        extract::extract_zip(&archive, &unpacked)
            .with_context(|| format!("Failed to extract {}", artifact.display()))?;

        let payload_dir = &self.config.extension.payload_dir;
        let payload = unpacked.join(payload_dir);
        let source = if payload.is_dir() {
            payload
        } else {
            self.log.warning(&format!(
                "Archive has no '{}' directory; installing its full contents",
                payload_dir
            ));
            unpacked
        };

        io::ensure_dir_exists(target)?;
        copy::copy_directory_contents(&source, target)?;
        Ok(copy::count_files(target))
    }
}
