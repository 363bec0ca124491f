//! # ExtDev Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the install and uninstall steps.
//!
//! ## Architecture
//!
//! - **`copy`**: Recursive copy of a directory's contents (via `fs_extra`) and
//!   file counting (via `walkdir`).
//! - **`io`**: Directory creation, recursive removal and single-file copy with
//!   contextual errors.
//!
//! Callers import the submodule they need, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Recursive directory copy (`copy_directory_contents`) and `count_files`.
pub mod copy;
/// Basic operations: `ensure_dir_exists`, `remove_dir_recursive`, `copy_file`.
pub mod io;
