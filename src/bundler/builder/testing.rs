//! In-memory process runner for pipeline tests.

use crate::bundler::{
    Result,
    utils::process::{CapturedOutput, Invocation, ProcessRunner},
};
use std::path::PathBuf;
use std::sync::Mutex;

/// Records invocations and simulates `dotnet publish` and `dotnet ncbeauty`.
///
/// Publishing writes the configured files into the `-o` directory; library
/// extraction creates the library folder inside the build directory.
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    publish_files: Vec<&'static str>,
    failing_publish: Option<(String, i32)>,
    library_exit_code: i32,
    project_version: Option<String>,
}

impl FakeRunner {
    pub(crate) fn new(publish_files: &[&'static str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            publish_files: publish_files.to_vec(),
            failing_publish: None,
            library_exit_code: 0,
            project_version: None,
        }
    }

    /// Makes publishing for `rid` exit with `code`.
    pub(crate) fn failing_publish(mut self, rid: &str, code: i32) -> Self {
        self.failing_publish = Some((rid.to_string(), code));
        self
    }

    pub(crate) fn failing_library_extraction(mut self, code: i32) -> Self {
        self.library_exit_code = code;
        self
    }

    pub(crate) fn with_project_version(mut self, version: &str) -> Self {
        self.project_version = Some(version.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// First argument of every recorded invocation, e.g. `publish`.
    pub(crate) fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.get_args().first().cloned())
            .collect()
    }

    /// Runtime identifiers of the recorded publish invocations.
    pub(crate) fn published_rids(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|c| c.get_args().first().is_some_and(|a| a == "publish"))
            .filter_map(|c| c.arg_after("-r").map(str::to_string))
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<i32> {
        self.calls.lock().unwrap().push(invocation.clone());

        match invocation.get_args().first().map(String::as_str) {
            Some("publish") => {
                if let Some((rid, code)) = &self.failing_publish {
                    if invocation.arg_after("-r") == Some(rid.as_str()) {
                        return Ok(*code);
                    }
                }
                let out = PathBuf::from(invocation.arg_after("-o").unwrap_or_default());
                std::fs::create_dir_all(&out)?;
                for file in &self.publish_files {
                    std::fs::write(out.join(file), file.as_bytes())?;
                }
                Ok(0)
            }
            Some("ncbeauty") => {
                if self.library_exit_code == 0 {
                    let args = invocation.get_args();
                    std::fs::create_dir_all(PathBuf::from(&args[4]).join(&args[5]))?;
                }
                Ok(self.library_exit_code)
            }
            _ => Ok(0),
        }
    }

    async fn run_capturing_output(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        Ok(match &self.project_version {
            Some(version) => CapturedOutput {
                stdout: format!("{version}\n"),
                exit_code: 0,
            },
            None => CapturedOutput {
                stdout: String::new(),
                exit_code: 1,
            },
        })
    }
}
