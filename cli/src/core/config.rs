//! # ExtDev Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the configuration that
//! drives the deploy pipeline: which extension is being developed, how it is
//! built, where the editor keeps installed extensions, and how the editor is
//! stopped and relaunched.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (used on its own)
//! 2. Project-specific `.extdev.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Paths are expanded (`~` to the home directory) after merging and the
//! result is validated before any step runs. The directory that holds the
//! project file becomes the project directory: build commands run there and
//! the artifact is resolved relative to it.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let artifact = cfg.artifact_path();
//! let target = cfg.target_dir();
//! ```
//!
use crate::core::error::{ExtdevError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub extension: ExtensionConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub build: BuildConfig,
    /// Directory the build commands run in. Not read from TOML; set by the loader.
    #[serde(skip)]
    pub project_dir: PathBuf,
}

/// Identity of the extension under development and the shape of its package.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    #[serde(default = "default_extension_name")]
    pub name: String,
    #[serde(default = "default_publisher")]
    pub publisher: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Artifact file name relative to the project directory.
    /// Derived as `<name>-<version>.vsix` when absent.
    pub artifact: Option<String>,
    /// Subdirectory of the archive that is installed.
    #[serde(default = "default_payload_dir")]
    pub payload_dir: String,
    /// Files that must exist in the installed directory after install.
    #[serde(default = "default_expected_files")]
    pub expected_files: Vec<String>,
}

/// The host editor: how to find it, relaunch it, and where it keeps extensions.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    #[serde(default = "default_process_name")]
    pub process_name: String,
    #[serde(default = "default_launch_command")]
    pub launch_command: String,
    #[serde(default)]
    pub launch_args: Vec<String>,
    /// Can use ~. Will be expanded.
    #[serde(default = "default_extensions_dir")]
    pub extensions_dir: String,
    /// Time given to the OS to release the editor's files after it is killed.
    #[serde(default = "default_shutdown_delay_ms")]
    pub shutdown_delay_ms: u64,
}

/// External tools used to build the package.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_install_command")]
    pub install_command: Vec<String>,
    #[serde(default = "default_package_command")]
    pub package_command: Vec<String>,
    /// Treat a non-zero exit of either command as fatal.
    #[serde(default)]
    pub fail_on_error: bool,
    /// Parent of the per-run scratch directory (system temp dir when absent).
    pub scratch_root: Option<String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            name: default_extension_name(),
            publisher: default_publisher(),
            version: default_version(),
            artifact: None,
            payload_dir: default_payload_dir(),
            expected_files: default_expected_files(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            process_name: default_process_name(),
            launch_command: default_launch_command(),
            launch_args: Vec::new(),
            extensions_dir: default_extensions_dir(),
            shutdown_delay_ms: default_shutdown_delay_ms(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            install_command: default_install_command(),
            package_command: default_package_command(),
            fail_on_error: false,
            scratch_root: None,
        }
    }
}

fn default_extension_name() -> String {
    "my-extension".to_string()
}
fn default_publisher() -> String {
    "local".to_string()
}
fn default_version() -> String {
    "0.0.1".to_string()
}
fn default_payload_dir() -> String {
    "extension".to_string()
}
fn default_expected_files() -> Vec<String> {
    vec!["extension.js".to_string(), "package.json".to_string()]
}
fn default_process_name() -> String {
    if cfg!(windows) {
        "Code".to_string()
    } else {
        "code".to_string()
    }
}
fn default_launch_command() -> String {
    "code".to_string()
}
fn default_extensions_dir() -> String {
    "~/.vscode/extensions".to_string()
}
fn default_shutdown_delay_ms() -> u64 {
    2000
}
fn default_install_command() -> Vec<String> {
    vec!["npm".to_string(), "install".to_string()]
}
fn default_package_command() -> Vec<String> {
    vec![
        "npx".to_string(),
        "@vscode/vsce".to_string(),
        "package".to_string(),
    ]
}

impl Config {
    /// `<publisher>.<name>`, the prefix the editor uses for installed directories.
    pub fn extension_id(&self) -> String {
        format!("{}.{}", self.extension.publisher, self.extension.name)
    }

    /// File name of the packaged artifact.
    pub fn artifact_name(&self) -> String {
        self.extension.artifact.clone().unwrap_or_else(|| {
            format!("{}-{}.vsix", self.extension.name, self.extension.version)
        })
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir.join(self.artifact_name())
    }

    pub fn extensions_dir(&self) -> PathBuf {
        PathBuf::from(&self.editor.extensions_dir)
    }

    /// Directory the new build is installed into.
    pub fn target_dir(&self) -> PathBuf {
        self.extensions_dir().join(format!(
            "{}-{}",
            self.extension_id(),
            self.extension.version
        ))
    }

    /// Glob matching every installed version of this extension.
    ///
    /// Versions start with a digit, so `acme.hello-world-2.0.0` does not
    /// match the pattern for `acme.hello`.
    pub fn installed_pattern(&self) -> String {
        let dir = glob::Pattern::escape(&self.editor.extensions_dir);
        let id = glob::Pattern::escape(&self.extension_id());
        format!("{}/{}-[0-9]*", dir.trim_end_matches(['/', '\\']), id)
    }

    /// Parent directory for the per-run scratch directory.
    pub fn scratch_root(&self) -> PathBuf {
        self.build
            .scratch_root
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".extdev.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read and the project directory is
/// the file's parent. Otherwise user and project files are merged over the
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let mut cfg = load_config_from_path(path)?;
            cfg.project_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or(std::env::current_dir().context("Failed to get current directory")?);
            cfg
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            let project_dir = match &project_config {
                Some((_, dir)) => dir.clone(),
                None => std::env::current_dir().context("Failed to get current directory")?,
            };
            let mut merged = merge_configs(
                user_config.unwrap_or_default(),
                project_config.map(|(cfg, _)| cfg),
            );
            merged.project_dir = project_dir;
            merged
        }
    };
    expand_config_paths(&mut config).context("Failed to expand paths in configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ExtDev", "extdev") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

/// Returns the project config together with the directory that holds it.
fn load_project_config() -> Result<Option<(Config, PathBuf)>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            let cfg = load_config_from_path(&path)?;
            let dir = path.parent().map(Path::to_path_buf).unwrap_or(current_dir);
            Ok(Some((cfg, dir)))
        }
        None => {
            debug!(
                "No project configuration file (.extdev.toml) found in current directory or ancestors."
            );
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.extdev.toml`, stopping at a git root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project value wins when it differs from the built-in default.
fn pick<T: PartialEq>(project: T, user: T, default: T) -> T {
    if project != default {
        project
    } else {
        user
    }
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let defaults = Config::default();
    let (pe, ue, de) = (project.extension, user.extension, defaults.extension);
    let (pd, ud, dd) = (project.editor, user.editor, defaults.editor);
    let (pb, ub, db) = (project.build, user.build, defaults.build);

    Config {
        extension: ExtensionConfig {
            name: pick(pe.name, ue.name, de.name),
            publisher: pick(pe.publisher, ue.publisher, de.publisher),
            version: pick(pe.version, ue.version, de.version),
            artifact: pe.artifact.or(ue.artifact),
            payload_dir: pick(pe.payload_dir, ue.payload_dir, de.payload_dir),
            expected_files: pick(pe.expected_files, ue.expected_files, de.expected_files),
        },
        editor: EditorConfig {
            process_name: pick(pd.process_name, ud.process_name, dd.process_name),
            launch_command: pick(pd.launch_command, ud.launch_command, dd.launch_command),
            launch_args: pick(pd.launch_args, ud.launch_args, dd.launch_args),
            extensions_dir: pick(pd.extensions_dir, ud.extensions_dir, dd.extensions_dir),
            shutdown_delay_ms: pick(
                pd.shutdown_delay_ms,
                ud.shutdown_delay_ms,
                dd.shutdown_delay_ms,
            ),
        },
        build: BuildConfig {
            install_command: pick(pb.install_command, ub.install_command, db.install_command),
            package_command: pick(pb.package_command, ub.package_command, db.package_command),
            fail_on_error: pb.fail_on_error || ub.fail_on_error,
            scratch_root: pb.scratch_root.or(ub.scratch_root),
        },
        project_dir: PathBuf::new(),
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    config.editor.extensions_dir = shellexpand::tilde(&config.editor.extensions_dir).into_owned();
    debug!(
        "Expanded extensions directory: {}",
        config.editor.extensions_dir
    );
    if let Some(root) = config.build.scratch_root.as_mut() {
        *root = shellexpand::tilde(root).into_owned();
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let required = [
        ("extension.name", &config.extension.name),
        ("extension.publisher", &config.extension.publisher),
        ("extension.version", &config.extension.version),
        ("editor.process_name", &config.editor.process_name),
        ("editor.launch_command", &config.editor.launch_command),
        ("editor.extensions_dir", &config.editor.extensions_dir),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(anyhow!(ExtdevError::Config(format!(
                "'{}' cannot be empty.",
                key
            ))));
        }
    }
    for (key, command) in [
        ("build.install_command", &config.build.install_command),
        ("build.package_command", &config.build.package_command),
    ] {
        if command.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(anyhow!(ExtdevError::Config(format!(
                "'{}' must name a program to run.",
                key
            ))));
        }
    }
    let ext_dir = config.extensions_dir();
    if !ext_dir.exists() {
        warn!(
            "Configured extensions directory '{}' does not exist yet.",
            ext_dir.display()
        );
    } else if !ext_dir.is_dir() {
        return Err(anyhow!(ExtdevError::Config(format!(
            "Configured extensions path '{}' exists but is not a directory.",
            ext_dir.display()
        ))));
    }
    info!("Configuration validation successful.");
    Ok(())
}
