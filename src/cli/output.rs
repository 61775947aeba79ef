//! User-facing console output.
//!
//! Progress and results go to stdout, warnings and errors to stderr.
//! Colour is only used when the stream is a terminal that supports it.
//! Diagnostics that only matter when debugging go through `log` instead.

use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use std::io::{self, Write};

/// Writes progress messages, honoring verbose and quiet modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager. Quiet suppresses everything except errors.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Prints a dimmed message only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.is_verbose() {
            let text = message.if_supports_color(Stream::Stdout, |t| t.dimmed());
            Self::write_line(io::stdout(), text);
        }
    }

    /// Prints a progress message.
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            let text = message.if_supports_color(Stream::Stdout, |t| t.bold());
            Self::write_line(io::stdout(), text);
        }
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            let mark = "✓".if_supports_color(Stream::Stdout, |t| t.green());
            Self::write_line(io::stdout(), format_args!("{mark} {message}"));
        }
    }

    /// Prints an indented line below the previous message.
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            Self::write_line(io::stdout(), format_args!("  {message}"));
        }
    }

    /// Prints a warning.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            let mark = "⚠".if_supports_color(Stream::Stderr, |t| t.yellow());
            let text = message.if_supports_color(Stream::Stderr, |t| t.yellow());
            Self::write_line(io::stderr(), format_args!("{mark} {text}"));
        }
    }

    /// Prints an error. Never suppressed.
    pub fn error(&self, message: &str) {
        let mark = "✗".if_supports_color(Stream::Stderr, |t| t.red());
        let text = message.if_supports_color(Stream::Stderr, |t| t.red());
        Self::write_line(io::stderr(), format_args!("{mark} {text}"));
    }

    fn write_line(mut stream: impl Write, message: impl Display) {
        // console may already be closed
        let _ = writeln!(stream, "{message}");
    }
}
