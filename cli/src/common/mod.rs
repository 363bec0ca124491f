//! # ExtDev Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers. Command-specific logic lives
//! in `commands::`, core infrastructure (config, errors) in `core::`.
//!
//! ## Architecture
//!
//! - **`archive`**: Zip extraction for packaged extensions.
//! - **`fs`**: Directory creation, removal and recursive copy.
//! - **`process`**: Finding, killing and launching processes; running external tools.
//! - **`ui`**: The tagged, colored status logger.
//!

/// Utilities for handling archive files (zip / vsix).
pub mod archive;
/// Utilities for filesystem operations (copying, I/O).
pub mod fs;
/// Process lookup, termination, launch, and external command execution.
pub mod process;
/// Terminal status output.
pub mod ui;
