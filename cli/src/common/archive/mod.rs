//! # ExtDev Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive handling for ExtDev. Packaged extensions (`.vsix`) are zip
//! containers; the install step extracts them in a scratch directory before
//! moving the payload into place.
//!
//! ## Architecture
//!
//! - **`extract`**: Extraction of zip-compatible archives, guarding against
//!   entries that would escape the destination directory.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive;
//!
//! let count = archive::extract::extract_zip(&scratch.join("pkg.zip"), &scratch.join("unpacked"))?;
//! ```
//!

pub mod extract;
