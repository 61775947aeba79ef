//! External process execution.
//!
//! Every external tool (publish, library extraction, project queries) runs
//! through a [`ProcessRunner`]. Invocations are awaited one at a time; there
//! is no timeout and no cancellation once a process has started.

use crate::bundler::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A program, its arguments and the directory to run it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory. Without one the child inherits ours.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Value following `flag` in the argument list, e.g. the path after `-o`.
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Standard output and exit code of a finished process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub exit_code: i32,
}

/// Runs external programs to completion.
pub trait ProcessRunner {
    /// Runs the invocation with inherited stdio and returns its exit code.
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<i32>> + Send;

    /// Runs the invocation, capturing standard output.
    fn run_capturing_output(
        &self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<CapturedOutput>> + Send;
}

/// [`ProcessRunner`] backed by real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandRunner {
    verbose: bool,
}

impl CommandRunner {
    /// Creates a runner. In verbose mode each command line and exit code is
    /// logged; otherwise children are started without a console window.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn command(&self, invocation: &Invocation) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(invocation.program());
        cmd.args(invocation.get_args());
        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }

        #[cfg(windows)]
        if !self.verbose {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }

    fn spawn_error(invocation: &Invocation, error: std::io::Error) -> Error {
        Error::CommandFailed {
            command: invocation.to_string(),
            error,
        }
    }

    fn finished(&self, invocation: &Invocation, status: std::process::ExitStatus) -> i32 {
        // Killed by a signal
        let code = status.code().unwrap_or(-1);
        if self.verbose {
            log::info!("{} finished with exit code {}", invocation.program(), code);
        }
        code
    }
}

impl ProcessRunner for CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<i32> {
        if self.verbose {
            log::info!("> {invocation}");
        }

        let status = self
            .command(invocation)
            .status()
            .await
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(self.finished(invocation, status))
    }

    async fn run_capturing_output(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        if self.verbose {
            log::info!("> {invocation}");
        }

        let output = self
            .command(invocation)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code: self.finished(invocation, output.status),
        })
    }
}
