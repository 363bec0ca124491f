//! # ExtDev Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ExtDev. Domain errors are
//! modelled by `ExtdevError` (derived with `thiserror`), while the crate-wide
//! `Result<T>` alias is `anyhow::Result<T>` so that I/O failures can carry
//! context about which step and which path was involved.
//!
//! ## Architecture
//!
//! - `ExtdevError`: specific, matchable failure kinds (missing artifact,
//!   configuration problems, external command failures, archive errors).
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! Only a few of these errors stop the deploy pipeline. Most step failures are
//! logged by the pipeline and execution continues; see `commands::deploy`.
//!
//! ## Examples
//!
//! ```rust
//! if !artifact.is_file() {
//!     return Err(ExtdevError::ArtifactMissing { path: artifact.to_path_buf() }.into());
//! }
//!
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the ExtDev application.
#[derive(Error, Debug)]
pub enum ExtdevError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Artifact not found: {}. Build the package first.", path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Process {pid} is no longer running.")]
    ProcessNotFound { pid: u32 },

    #[error("Archive error: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
