//! Top-level error types for the command line layer.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type returned by the command line layer
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error(transparent)]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline errors
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Arguments parsed but don't form usable settings
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Process exit code for this error.
    ///
    /// Failing external processes propagate their own code; everything else
    /// is `-1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundlerError::Bundler(e) => e.exit_code(),
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error;

    #[test]
    fn exit_codes_follow_the_failing_process() {
        let publish: BundlerError = Error::PublishFailed {
            target: "linux".into(),
            code: 3,
        }
        .into();
        assert_eq!(publish.exit_code(), 3);

        let invalid: BundlerError = CliError::InvalidArguments {
            reason: "bad".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), -1);
        assert_eq!(invalid.to_string(), "Invalid arguments: bad");
    }

    #[test]
    fn anyhow_errors_keep_their_context_chain() {
        let err: BundlerError = anyhow::anyhow!("inner").context("outer").into();
        assert_eq!(err.to_string(), "outer: inner");
        assert_eq!(err.exit_code(), -1);
    }
}
