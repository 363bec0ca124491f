//! # ExtDev Status Logger (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! User-facing progress output for the deploy pipeline. Each line carries a
//! colored severity tag so that a long build log stays scannable:
//!
//! ```text
//! [*] Building package...
//! [+] Package built
//! [!] No previously installed copy found
//! [x] Missing expected file: extension.js
//! ```
//!
//! ## Architecture
//!
//! `Logger` is a small value passed to the pipeline. Status, success and debug
//! lines go to stdout; warnings and errors go to stderr. Debug lines are only
//! printed when the logger was created verbose. Every line is also emitted as
//! a debug-level `tracing` event, so `-vv` or `RUST_LOG=debug` logs carry the
//! same story as the terminal without doubling it at default verbosity.
//! Colors come from `console`, which disables them when the stream is not a
//! terminal.
//!
use console::{style, StyledObject};

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Status,
    Success,
    Warning,
    Error,
    Debug,
}

impl Severity {
    /// Plain-text tag printed in front of the message.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Status => "[*]",
            Severity::Success => "[+]",
            Severity::Warning => "[!]",
            Severity::Error => "[x]",
            Severity::Debug => "[.]",
        }
    }

    fn styled_tag(self) -> StyledObject<&'static str> {
        let tag = style(self.tag());
        match self {
            Severity::Status => tag.cyan().bold(),
            Severity::Success => tag.green().bold(),
            Severity::Warning => tag.yellow().bold(),
            Severity::Error => tag.red().bold(),
            Severity::Debug => tag.dim(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Severity::Warning | Severity::Error)
    }
}

/// Tagged console output for pipeline steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn status(&self, msg: &str) {
        self.emit(Severity::Status, msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit(Severity::Success, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.emit(Severity::Warning, msg);
    }

    pub fn error(&self, msg: &str) {
        self.emit(Severity::Error, msg);
    }

    /// Printed only in verbose mode; always traced.
    pub fn debug(&self, msg: &str) {
        self.emit(Severity::Debug, msg);
    }

    /// Whether a line of this severity reaches the terminal.
    fn shows(&self, severity: Severity) -> bool {
        severity != Severity::Debug || self.verbose
    }

    fn emit(&self, severity: Severity, msg: &str) {
        tracing::debug!(?severity, "{}", msg);
        if !self.shows(severity) {
            return;
        }
        if severity.to_stderr() {
            eprintln!("{} {}", severity.styled_tag(), msg);
        } else {
            println!("{} {}", severity.styled_tag(), msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct() {
        let all = [
            Severity::Status,
            Severity::Success,
            Severity::Warning,
            Severity::Error,
            Severity::Debug,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.tag(), b.tag());
            }
        }
    }

    #[test]
    fn test_error_tag() {
        assert_eq!(Severity::Error.tag(), "[x]");
        assert_eq!(Severity::Success.tag(), "[+]");
    }

    #[test]
    fn test_stream_routing() {
        assert!(Severity::Error.to_stderr());
        assert!(Severity::Warning.to_stderr());
        assert!(!Severity::Success.to_stderr());
        assert!(!Severity::Debug.to_stderr());
    }

    #[test]
    fn test_verbosity_flag() {
        assert!(!Logger::default().is_verbose());
        assert!(Logger::new(true).is_verbose());
    }

    #[test]
    fn test_debug_lines_held_back_unless_verbose() {
        let quiet = Logger::default();
        let verbose = Logger::new(true);
        assert!(!quiet.shows(Severity::Debug));
        assert!(verbose.shows(Severity::Debug));
        for severity in [
            Severity::Status,
            Severity::Success,
            Severity::Warning,
            Severity::Error,
        ] {
            assert!(quiet.shows(severity));
            assert!(verbose.shows(severity));
        }
    }
}
