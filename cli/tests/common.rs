//! # ExtDev CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: locating the
//! compiled `extdev` binary and laying out a throwaway project, extensions
//! directory and scratch root with a matching config file.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Process name that is never running, so no real editor gets killed.
pub const FAKE_EDITOR: &str = "extdev-test-editor-xyz";

/// `assert_cmd::Command` for the compiled `extdev` binary.
///
/// ## Panics
/// Panics if the `extdev` binary cannot be found via `Command::cargo_bin`.
pub fn extdev_cmd() -> Command {
    let mut cmd = Command::cargo_bin("extdev").expect("Failed to find extdev binary for testing");
    cmd.env_remove("EXTDEV_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// A temp workspace: `project/`, `extensions/`, `scratch/` and `extdev.toml`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Creates the layout and writes a config; `extra` is appended verbatim.
    pub fn new(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        for sub in ["project", "extensions", "scratch"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        let ws = Self { dir };
        let config = format!(
            "[extension]\n\
             name = \"hello\"\n\
             publisher = \"acme\"\n\
             version = \"1.0.0\"\n\
             \n\
             [editor]\n\
             process_name = {editor:?}\n\
             launch_command = {editor:?}\n\
             extensions_dir = {exts:?}\n\
             shutdown_delay_ms = 0\n\
             \n\
             [build]\n\
             scratch_root = {scratch:?}\n\
             {extra}\n",
            editor = FAKE_EDITOR,
            exts = ws.extensions().to_string_lossy(),
            scratch = ws.scratch().to_string_lossy(),
            extra = extra,
        );
        fs::write(ws.config_path(), config).unwrap();
        ws
    }

    /// Config file placed inside `project/`, so the project dir resolves there.
    pub fn config_path(&self) -> PathBuf {
        self.project().join("extdev.toml")
    }

    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn extensions(&self) -> PathBuf {
        self.dir.path().join("extensions")
    }

    pub fn scratch(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }

    pub fn target(&self) -> PathBuf {
        self.extensions().join("acme.hello-1.0.0")
    }

    pub fn artifact(&self) -> PathBuf {
        self.project().join("hello-1.0.0.vsix")
    }

    /// `extdev --config <workspace config> <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = extdev_cmd();
        cmd.arg("--config").arg(self.config_path()).args(args);
        cmd
    }
}

/// Writes a vsix-shaped zip at `path` with `files` under `extension/`.
pub fn write_vsix(path: &Path, files: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer
        .start_file("extension.vsixmanifest", options)
        .unwrap();
    writer.write_all(b"<PackageManifest/>").unwrap();
    for (name, contents) in files {
        writer
            .start_file(format!("extension/{}", name), options)
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}
