//! # ExtDev Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure used by every command:
//! - `config`: Configuration loading, merging, expansion and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ExtdevError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
