//! Per-target publish pipeline.
//!
//! Stages run strictly in order and the first failure aborts the rest:
//!
//! 1. `dotnet publish` into the target's build directory
//! 2. library extraction into the library folder (`dotnet ncbeauty`)
//! 3. version prefix rename
//! 4. executable name prefix rename
//! 5. post-publish hook (app bundle for mac targets)
//! 6. zip archive, replacing the build directory
//!
//! Filesystem changes are not rolled back when a later stage fails.

use super::plan::{BuildTarget, PostPublishHook};
use crate::bundler::{
    error::{Context, Error, Result},
    platform::macos,
    settings::Settings,
    utils::{
        archive::{self, Compression},
        fs,
        process::{Invocation, ProcessRunner},
    },
};
use crate::metadata;
use std::path::{Path, PathBuf};

/// Formats a flag the way MSBuild properties expect it.
fn msbuild_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Runs every stage for one target.
pub struct PublishPipeline<'a, R> {
    settings: &'a Settings,
    project: &'a Path,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> PublishPipeline<'a, R> {
    pub fn new(settings: &'a Settings, project: &'a Path, runner: &'a R) -> Self {
        Self {
            settings,
            project,
            runner,
        }
    }

    /// Publishes and packages `target`.
    ///
    /// Returns the final deliverable: the build directory, or the zip that
    /// replaced it.
    pub async fn run(&self, target: &BuildTarget) -> Result<PathBuf> {
        let mut build_dir = self.settings.build_directory(&target.dir_name);

        self.publish(target, &build_dir).await?;

        if self.should_extract_libraries(target) {
            self.extract_libraries(target, &build_dir).await?;
        }

        let naming = self.settings.naming();
        if naming.include_version {
            let version = metadata::resolve_version(&build_dir, self.project, self.runner).await?;
            build_dir = prefix_directory(&build_dir, &version).await?;
        }
        if naming.name_builds {
            let name = metadata::resolve_name(&build_dir).await?;
            build_dir = prefix_directory(&build_dir, &name).await?;
        }

        self.run_hook(target, &build_dir).await?;

        if self.settings.zip() {
            return archive_build(&build_dir).await;
        }
        Ok(build_dir)
    }

    /// Command line of the publish stage.
    pub fn publish_invocation(&self, target: &BuildTarget, build_dir: &Path) -> Invocation {
        let publish = self.settings.publish();
        let extra_args = publish
            .extra_args
            .as_deref()
            .unwrap_or_default()
            .split_whitespace();

        Invocation::new("dotnet")
            .arg("publish")
            .arg(self.project.display().to_string())
            .args(["-o".to_string(), build_dir.display().to_string()])
            .args(["-r", target.runtime_id.as_str()])
            .arg("--self-contained")
            .args(["-c", publish.configuration.as_str()])
            .arg(format!("/p:PublishTrimmed={}", msbuild_bool(publish.trimmed())))
            .arg(format!("/p:PublishAot={}", msbuild_bool(publish.aot)))
            .args(extra_args)
    }

    /// Command line of the library extraction stage.
    pub fn library_invocation(&self, build_dir: &Path) -> Invocation {
        let library = self.settings.library();
        let log_level = if self.settings.verbose() { "Detail" } else { "Error" };

        let mut invocation = Invocation::new("dotnet")
            .arg("ncbeauty")
            .arg(format!("--loglevel={log_level}"))
            .arg("--force=True")
            .arg("--noflag=True")
            .arg(build_dir.display().to_string())
            .arg(library.folder_name.as_str())
            .current_dir(self.settings.tool_directory());

        let exclusions = library.combined_exclusions();
        if !exclusions.is_empty() {
            invocation = invocation.arg(exclusions.join(";"));
        }
        invocation
    }

    fn should_extract_libraries(&self, target: &BuildTarget) -> bool {
        !self.settings.library().skip
            && !target.skip_library_extraction
            && !self.settings.publish().aot
    }

    async fn publish(&self, target: &BuildTarget, build_dir: &Path) -> Result<()> {
        let code = self
            .runner
            .run(&self.publish_invocation(target, build_dir))
            .await?;
        if code != 0 {
            return Err(Error::PublishFailed {
                target: target.display_name.clone(),
                code,
            });
        }
        Ok(())
    }

    async fn extract_libraries(&self, target: &BuildTarget, build_dir: &Path) -> Result<()> {
        let code = self.runner.run(&self.library_invocation(build_dir)).await?;
        if code != 0 {
            return Err(Error::LibraryExtractionFailed {
                target: target.display_name.clone(),
                code,
            });
        }
        Ok(())
    }

    async fn run_hook(&self, target: &BuildTarget, build_dir: &Path) -> Result<()> {
        match target.post_publish_hook {
            PostPublishHook::None => Ok(()),
            PostPublishHook::MacBundle => {
                let bundle = macos::bundle_project(build_dir, self.settings).await?;
                log::debug!("Created {}", bundle.app.display());
                Ok(())
            }
        }
    }
}

/// Moves `dir` to `<prefix>-<name>` next to it, replacing an existing directory.
async fn prefix_directory(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let parent = dir.parent().context("build directory has no parent")?;
    let name = dir
        .file_name()
        .context("build directory has no name")?
        .to_string_lossy();
    let dest = parent.join(format!("{prefix}-{name}"));

    fs::move_dir(dir, &dest).await?;
    log::info!("Moved build directory to {}", dest.display());
    Ok(dest)
}

/// Zips `dir` into `<name>.zip` next to it and deletes the directory.
///
/// Any failure, including removing the previous archive or the directory,
/// is an [`Error::ArchiveFailed`].
async fn archive_build(dir: &Path) -> Result<PathBuf> {
    replace_with_archive(dir)
        .await
        .map_err(|e| archive::archive_failure(dir, e))
}

async fn replace_with_archive(dir: &Path) -> Result<PathBuf> {
    let parent = dir.parent().context("build directory has no parent")?;
    let name = dir
        .file_name()
        .context("build directory has no name")?
        .to_string_lossy();
    let zip_path = parent.join(format!("{name}.zip"));

    fs::remove_file(&zip_path).await?;
    archive::zip_dir(dir, &zip_path, Compression::Deflate).await?;
    fs::remove_dir_all(dir).await?;
    log::info!("Zipped build to {}", zip_path.display());
    Ok(zip_path)
}
