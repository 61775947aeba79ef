//! Error types for the publish pipeline.
//!
//! Every failure kind is terminal for the run. [`Error::exit_code`] maps each
//! kind onto the process exit code the binary reports.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Guidance shown when the library extraction tool fails.
pub const LIBRARY_EXTRACTION_HINT: &str = "This is likely because the artifact for the specified \
runtime identifier does not exist. See https://github.com/nulastudio/NetBeauty2/discussions/36 \
for more information, and run with --verbose to see more details.";

/// Errors produced while planning, publishing and packaging builds.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// A prerequisite external tool is missing or could not be restored.
    #[error("toolchain unavailable: {0}")]
    ToolchainUnavailable(String),

    /// No project file was supplied and none could be discovered.
    #[error("project file not found: {}", .path.display())]
    ProjectNotFound {
        /// Path that was supplied or searched
        path: PathBuf,
    },

    /// The external publish command exited unsuccessfully.
    #[error("publishing {target} failed with exit code {code}")]
    PublishFailed {
        /// Display name of the target
        target: String,
        /// Exit code of the publish process
        code: i32,
    },

    /// The external library extraction tool exited unsuccessfully.
    #[error("library extraction for {target} failed with exit code {code}. {}", LIBRARY_EXTRACTION_HINT)]
    LibraryExtractionFailed {
        /// Display name of the target
        target: String,
        /// Exit code of the extraction process
        code: i32,
    },

    /// The build's name or version could not be determined.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// Archiving a build directory failed.
    #[error("failed to archive {}: {reason}", .path.display())]
    ArchiveFailed {
        /// Directory that was being archived
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },

    /// A child process could not be spawned or awaited.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Underlying I/O error
        error: io::Error,
    },

    /// A filesystem operation failed.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        error: io::Error,
    },

    #[error("{0}")]
    IoError(#[from] io::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Exit code reported for this error.
    ///
    /// Failures of an external process propagate that process's exit code;
    /// everything else is a generic precondition failure (`-1`).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PublishFailed { code, .. } | Error::LibraryExtractionFailed { code, .. }
                if *code != 0 =>
            {
                *code
            }
            _ => -1,
        }
    }
}

/// Failures of build name and version resolution.
///
/// Kept separate from [`Error`] so callers can tell a missing entry binary
/// from an ambiguous one from an I/O problem.
#[derive(Debug, DeriveError)]
pub enum NamingError {
    #[error("couldn't determine the build name: no entry binary found in {}", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("couldn't determine the build name: {} contains several entry binaries ({})", .dir.display(), .candidates.join(", "))]
    Ambiguous {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("couldn't determine the build version from {}", .source_path.display())]
    MissingVersion { source_path: PathBuf },

    #[error("failed to inspect {}: {error}", .path.display())]
    Io { path: PathBuf, error: io::Error },
}

/// Adds a message to the error of a fallible value.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Attaches the filesystem path to an I/O error.
pub trait ErrorExt<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_failures_propagate_their_exit_code() {
        let err = Error::PublishFailed {
            target: "windows".into(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);

        let err = Error::LibraryExtractionFailed {
            target: "linux".into(),
            code: 134,
        };
        assert_eq!(err.exit_code(), 134);
    }

    #[test]
    fn precondition_failures_exit_with_minus_one() {
        assert_eq!(Error::ToolchainUnavailable("dotnet".into()).exit_code(), -1);
        assert_eq!(
            Error::ProjectNotFound {
                path: PathBuf::from("missing.csproj")
            }
            .exit_code(),
            -1
        );
        let naming = Error::from(NamingError::NotFound {
            dir: PathBuf::from("bin"),
        });
        assert_eq!(naming.exit_code(), -1);
    }

    #[test]
    fn library_extraction_message_carries_guidance() {
        let err = Error::LibraryExtractionFailed {
            target: "mac arm".into(),
            code: 1,
        };
        let message = err.to_string();
        assert!(message.contains("runtime identifier does not exist"));
        assert!(message.contains("--verbose"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.fs_context("moving build directory", "/tmp/win").unwrap_err();
        assert!(err.to_string().contains("moving build directory /tmp/win"));
    }
}
