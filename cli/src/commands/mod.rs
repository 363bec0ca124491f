//! # ExtDev Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level command:
//! - `deploy`: the full stop/build/uninstall/install/verify/restart pipeline (default)
//! - `uninstall`: only remove installed copies of the extension
//! - `verify`: only check the installed copy for its expected files
//!
//! Each module exposes an `Args` struct (clap) and an async `handle_*`
//! function that `main.rs` routes to. `uninstall` and `verify` reuse the
//! corresponding steps of `deploy::Deployer`.
//!
pub mod deploy;
pub mod uninstall;
pub mod verify;
