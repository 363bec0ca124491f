//! # ExtDev Zip Extraction (`common::archive::extract`)
//!
//! File: cli/src/common/archive/extract.rs
//!
//! ## Overview
//!
//! Extracts zip-compatible archives (such as `.vsix` extension packages) onto
//! disk using the `zip` crate.
//!
//! ## Architecture
//!
//! `extract_zip` walks every entry of the archive in order:
//! - Entry names are resolved with `enclosed_name`, so entries that would land
//!   outside the destination (absolute paths, `..` components) are skipped
//!   with a warning.
//! - Directory entries are created; file entries have their parent directories
//!   created and their contents streamed to disk.
//! - On Unix, stored permission bits are applied when present.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::extract;
//!
//! let files = extract::extract_zip(Path::new("/tmp/scratch/pkg.zip"), Path::new("/tmp/scratch/out"))?;
//! ```
//!
use crate::core::error::{ExtdevError, Result};
use anyhow::Context;
use std::{fs, io, path::Path};
use tracing::{debug, info, warn};

/// Extracts every entry of the zip archive at `archive` into `dest`.
///
/// `dest` is created if needed. Returns the number of files written.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<usize> {
    info!("Extracting {:?} into {:?}", archive, dest);
    let file = fs::File::open(archive)
        .with_context(|| format!("Failed to open archive {:?}", archive))?;
    let mut zip = ::zip::ZipArchive::new(file)
        .map_err(ExtdevError::from)
        .with_context(|| format!("Failed to read zip archive {:?}", archive))?;

    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create extraction directory {:?}", dest))?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(ExtdevError::from)
            .with_context(|| format!("Failed to read entry {} of {:?}", i, archive))?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("Failed to create directory {:?}", out_path))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        let mut out_file = fs::File::create(&out_path)
            .with_context(|| format!("Failed to create file {:?}", out_path))?;
        io::copy(&mut entry, &mut out_file)
            .with_context(|| format!("Failed to extract {:?}", out_path))?;
        written += 1;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                // Permission bits are best effort; content is already on disk.
                if let Err(e) = fs::set_permissions(&out_path, fs::Permissions::from_mode(mode)) {
                    debug!("Could not set permissions on {:?}: {}", out_path, e);
                }
            }
        }
    }

    info!("Extracted {} file(s) from {:?}", written, archive);
    Ok(written)
}
