//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the publish
//! pipeline for every planned target, one after another.

use super::{
    pipeline::PublishPipeline,
    plan::{BuildTarget, plan},
    tool_detection,
};
use crate::bundler::{
    Result,
    settings::Settings,
    utils::process::{CommandRunner, ProcessRunner},
};
use crate::cli::OutputManager;
use std::path::{Path, PathBuf};

/// Printed when no target was selected.
pub const NO_BUILD_HINT: &str =
    "No build took place. Supply -w, -l or -m arguments or see available arguments using --help.";

/// A target that finished every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltTarget {
    pub display_name: String,
    /// Build directory or zip archive that replaced it.
    pub deliverable: PathBuf,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BundleReport {
    pub project: PathBuf,
    pub built: Vec<BuiltTarget>,
}

impl BundleReport {
    pub fn built_anything(&self) -> bool {
        !self.built.is_empty()
    }
}

/// Main bundler orchestrator.
///
/// Runs targets strictly in plan order. The first failing target aborts the
/// run; targets after it are never started and earlier outputs are left as
/// they are.
///
/// # Examples
///
/// ```no_run
/// use gamebundle::bundler::{Bundler, SettingsBuilder, TargetKind};
/// use gamebundle::cli::OutputManager;
///
/// # async fn example() -> gamebundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_target(TargetKind::Linux, true)
///     .build()?;
/// let report = Bundler::new(settings, OutputManager::default()).bundle().await?;
/// for target in &report.built {
///     println!("{}: {}", target.display_name, target.deliverable.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = CommandRunner> {
    settings: Settings,
    runner: R,
    output: OutputManager,
}

impl Bundler<CommandRunner> {
    /// Creates a bundler that runs real processes.
    pub fn new(settings: Settings, output: OutputManager) -> Self {
        let runner = CommandRunner::new(settings.verbose());
        Self::with_runner(settings, runner, output)
    }
}

impl<R: ProcessRunner> Bundler<R> {
    /// Creates a bundler with a custom process runner.
    pub fn with_runner(settings: Settings, runner: R, output: OutputManager) -> Self {
        Self {
            settings,
            runner,
            output,
        }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Checks the toolchain, finds the project and builds every selected target.
    pub async fn bundle(&self) -> Result<BundleReport> {
        tool_detection::ensure_toolchain(&self.runner, self.settings.tool_directory()).await?;

        let current_dir = std::env::current_dir()?;
        let project =
            crate::source::find_project_file(self.settings.project(), &current_dir).await?;
        self.output
            .progress(&format!("Bundling project {}", project.display()));

        self.bundle_targets(&project, &plan(&self.settings)).await
    }

    /// Builds the selected entries of `targets` in order, stopping at the first failure.
    pub async fn bundle_targets(
        &self,
        project: &Path,
        targets: &[BuildTarget],
    ) -> Result<BundleReport> {
        let pipeline = PublishPipeline::new(&self.settings, project, &self.runner);
        let mut report = BundleReport {
            project: project.to_path_buf(),
            built: Vec::new(),
        };

        for target in targets.iter().filter(|t| t.should_build) {
            self.output
                .progress(&format!("Bundling for {}", target.display_name));
            self.output.verbose(&format!(
                "Publishing {} into {}",
                target.runtime_id,
                self.settings.build_directory(&target.dir_name).display()
            ));

            let deliverable = pipeline.run(target).await?;
            self.output.indent(&format!("-> {}", deliverable.display()));
            report.built.push(BuiltTarget {
                display_name: target.display_name.clone(),
                deliverable,
            });
        }

        if !report.built_anything() {
            self.output.warn(NO_BUILD_HINT);
        }
        self.output.success("Done");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeRunner;
    use super::*;
    use crate::bundler::Error;
    use crate::bundler::settings::{SettingsBuilder, TargetKind};
    use tempfile::TempDir;

    fn bundler(tmp: &TempDir, kinds: &[TargetKind], runner: FakeRunner) -> Bundler<FakeRunner> {
        let mut builder = SettingsBuilder::new()
            .output_directory(tmp.path().join("out"))
            .tool_directory(tmp.path());
        for kind in kinds {
            builder = builder.build_target(*kind, true);
        }
        Bundler::with_runner(
            builder.build().unwrap(),
            runner,
            OutputManager::new(false, true),
        )
    }

    #[tokio::test]
    async fn builds_selected_targets_in_plan_order() {
        let tmp = TempDir::new().unwrap();
        let bundler = bundler(
            &tmp,
            &[TargetKind::MacArm, TargetKind::Windows, TargetKind::Linux],
            FakeRunner::new(&["Game", "Game.dll"]),
        );
        let project = tmp.path().join("Game.csproj");

        let report = bundler
            .bundle_targets(&project, &plan(bundler.settings()))
            .await
            .unwrap();

        assert_eq!(
            bundler.runner().published_rids(),
            vec!["win-x64", "linux-x64", "osx-arm64"]
        );
        let names: Vec<&str> = report.built.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["windows", "linux", "mac arm"]);
        assert_eq!(report.built[2].deliverable, tmp.path().join("out/mac-arm"));
    }

    #[tokio::test]
    async fn first_failure_stops_the_run() {
        let tmp = TempDir::new().unwrap();
        let bundler = bundler(
            &tmp,
            &[TargetKind::Windows, TargetKind::Linux, TargetKind::Mac],
            FakeRunner::new(&["Game", "Game.dll"]).failing_publish("linux-x64", 1),
        );
        let project = tmp.path().join("Game.csproj");

        let err = bundler
            .bundle_targets(&project, &plan(bundler.settings()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PublishFailed { ref target, code: 1 } if target == "linux"));
        assert_ne!(err.exit_code(), 0);
        assert_eq!(
            bundler.runner().published_rids(),
            vec!["win-x64", "linux-x64"]
        );
        // earlier output stays, later targets never start
        assert!(tmp.path().join("out/win").is_dir());
        assert!(!tmp.path().join("out/mac").exists());
    }

    #[tokio::test]
    async fn nothing_selected_builds_nothing() {
        let tmp = TempDir::new().unwrap();
        let bundler = bundler(&tmp, &[], FakeRunner::new(&["Game"]));

        let report = bundler
            .bundle_targets(&tmp.path().join("Game.csproj"), &plan(bundler.settings()))
            .await
            .unwrap();

        assert!(!report.built_anything());
        assert!(bundler.runner().calls().is_empty());
    }
}
