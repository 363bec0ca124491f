//! # ExtDev Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive copying used to move an extracted extension payload into the
//! editor's extensions directory.
//!
//! ## Architecture
//!
//! `copy_directory_contents` uses `fs_extra::dir::copy` with `content_only`,
//! so the *contents* of the source land directly inside the target rather
//! than in a nested directory named after the source. Existing files are
//! overwritten. `count_files` walks a tree with `walkdir` to report how much
//! was installed.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//!
//! copy::copy_directory_contents(&scratch.join("unpacked/extension"), &target_dir)?;
//! let installed = copy::count_files(&target_dir);
//! ```
//!
use crate::core::error::Result;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Copies everything inside `source` into `target`.
///
/// `target` is created if it does not exist. Files already present in
/// `target` are overwritten; unrelated files are left alone.
pub fn copy_directory_contents(source: &Path, target: &Path) -> Result<u64> {
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;
    options.copy_inside = true;

    let bytes = fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(bytes)
}

/// Number of regular files below `root`. Unreadable entries are not counted.
pub fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_directory_contents_flattens_source_dir() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("extension");
        fs::create_dir_all(source.join("out"))?;
        fs::write(source.join("package.json"), "{}")?;
        fs::write(source.join("out/extension.js"), "js")?;

        let target = temp.path().join("installed/local.ext-0.0.1");
        copy_directory_contents(&source, &target)?;

        assert!(target.join("package.json").is_file());
        assert!(target.join("out/extension.js").is_file());
        assert!(!target.join("extension").exists());
        assert_eq!(count_files(&target), 2);
        Ok(())
    }

    #[test]
    fn test_copy_directory_contents_overwrites() -> Result<()> {
        let temp = tempdir()?;
        let source = temp.path().join("src");
        fs::create_dir_all(&source)?;
        fs::write(source.join("package.json"), "new")?;

        let target = temp.path().join("dst");
        fs::create_dir_all(&target)?;
        fs::write(target.join("package.json"), "old")?;

        copy_directory_contents(&source, &target)?;
        assert_eq!(fs::read_to_string(target.join("package.json"))?, "new");
        Ok(())
    }

    #[test]
    fn test_copy_directory_contents_missing_source() {
        let temp = tempdir().unwrap();
        let result = copy_directory_contents(&temp.path().join("nope"), &temp.path().join("dst"));
        assert!(result.is_err());
    }

    #[test]
    fn test_count_files_missing_root_is_zero() {
        let temp = tempdir().unwrap();
        assert_eq!(count_files(&temp.path().join("absent")), 0);
    }
}
