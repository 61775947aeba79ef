//! Publishing and packaging tool for self-contained game builds.
//!
//! Publishes a project for windows, linux and mac (x64 and arm), moves shared
//! libraries into a library folder, optionally builds macOS `.app` bundles
//! and zips the results.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
