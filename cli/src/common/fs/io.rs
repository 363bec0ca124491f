//! # ExtDev Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the install and uninstall steps,
//! adding context to errors so a failed step reports which path was involved.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing;
//!   errors if the path exists but is not a directory.
//! - **`remove_dir_recursive`**: Deletes a directory tree; a missing path is
//!   a no-op.
//! - **`copy_file`**: Copies one file, creating the destination's parent
//!   directory first.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&target_dir)?;
//! io::copy_file(&artifact, &scratch.join("pkg.zip"))?;
//! io::remove_dir_recursive(&old_install)?;
//! ```
//!
use crate::core::error::{ExtdevError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates it, including any missing parents, if it does not exist. If the
/// path already exists but is not a directory, an `ExtdevError::FileSystem`
/// is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ExtdevError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Recursively removes the directory at `path`.
///
/// Returns `Ok(false)` if nothing existed there, `Ok(true)` once removed.
pub fn remove_dir_recursive(path: &Path) -> Result<bool> {
    if !path.exists() {
        debug!("Nothing to remove at {:?}", path);
        return Ok(false);
    }
    if !path.is_dir() {
        anyhow::bail!(ExtdevError::FileSystem(format!(
            "Refusing to remove non-directory path: {:?}",
            path
        )));
    }
    fs::remove_dir_all(path).with_context(|| format!("Failed to remove directory {:?}", path))?;
    info!("Removed directory: {:?}", path);
    Ok(true)
}

/// Copies a single file from `source` to `target`, overwriting `target`.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)?;
    }
    let bytes = fs::copy(source, target)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;
    debug!("Copied {} bytes from {:?} to {:?}", bytes, source, target);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_remove_dir_recursive() -> Result<()> {
        let base_dir = tempdir()?;
        let tree = base_dir.path().join("ext");
        fs::create_dir_all(tree.join("out"))?;
        fs::write(tree.join("out/extension.js"), "x")?;

        assert!(remove_dir_recursive(&tree)?);
        assert!(!tree.exists());
        // Second call has nothing to do.
        assert!(!remove_dir_recursive(&tree)?);
        Ok(())
    }

    #[test]
    fn test_remove_dir_recursive_rejects_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("file.vsix");
        fs::write(&file_path, "zip")?;
        assert!(remove_dir_recursive(&file_path).is_err());
        assert!(file_path.exists());
        Ok(())
    }

    #[test]
    fn test_copy_file_creates_parent() -> Result<()> {
        let base_dir = tempdir()?;
        let source = base_dir.path().join("pkg.vsix");
        fs::write(&source, "payload")?;
        let target = base_dir.path().join("scratch/pkg.zip");

        let bytes = copy_file(&source, &target)?;
        assert_eq!(bytes, 7);
        assert_eq!(fs::read_to_string(&target)?, "payload");
        Ok(())
    }
}
