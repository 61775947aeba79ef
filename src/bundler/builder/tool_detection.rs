//! External tool detection and restoration.
//!
//! Publishing and library extraction both go through the `dotnet` CLI; the
//! extraction tool itself is a local dotnet tool restored before any target
//! is built.

use crate::bundler::{
    Error, Result,
    utils::process::{Invocation, ProcessRunner},
};
use std::path::Path;
use std::sync::LazyLock;

/// Check if the dotnet CLI is available on `PATH`.
///
/// Cached result to avoid repeated lookups.
pub static HAS_DOTNET: LazyLock<bool> = LazyLock::new(|| match which::which("dotnet") {
    Ok(path) => {
        log::debug!("Found dotnet at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("dotnet not found in PATH: {}", e);
        false
    }
});

/// Runs `dotnet tool restore` in `tool_dir`.
pub async fn restore_tools<R: ProcessRunner>(runner: &R, tool_dir: &Path) -> Result<()> {
    let invocation = Invocation::new("dotnet")
        .args(["tool", "restore"])
        .current_dir(tool_dir);

    let code = runner.run(&invocation).await.map_err(|e| {
        Error::ToolchainUnavailable(format!("failed to run `{invocation}`: {e}"))
    })?;

    if code != 0 {
        return Err(Error::ToolchainUnavailable(format!(
            "`{invocation}` failed with exit code {code}"
        )));
    }
    Ok(())
}

/// Verifies the toolchain and restores local tools.
pub async fn ensure_toolchain<R: ProcessRunner>(runner: &R, tool_dir: &Path) -> Result<()> {
    if !*HAS_DOTNET {
        return Err(Error::ToolchainUnavailable(
            "the dotnet CLI was not found in PATH".to_string(),
        ));
    }
    restore_tools(runner, tool_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::utils::process::CapturedOutput;

    struct ExitWith(i32);

    impl ProcessRunner for ExitWith {
        async fn run(&self, invocation: &Invocation) -> Result<i32> {
            assert_eq!(invocation.get_args(), ["tool", "restore"]);
            assert_eq!(invocation.working_dir(), Some(Path::new("/opt/gamebundle")));
            Ok(self.0)
        }

        async fn run_capturing_output(&self, _invocation: &Invocation) -> Result<CapturedOutput> {
            unreachable!("tool restore doesn't capture output")
        }
    }

    #[tokio::test]
    async fn restore_runs_in_tool_directory() {
        restore_tools(&ExitWith(0), Path::new("/opt/gamebundle"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_restore_is_toolchain_unavailable() {
        let err = restore_tools(&ExitWith(1), Path::new("/opt/gamebundle"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolchainUnavailable(_)));
        assert_eq!(err.exit_code(), -1);
    }
}
