//! Builder for constructing Settings.

use super::{
    LibrarySettings, MacBundleSettings, NamingSettings, PublishSettings, Settings, TargetKind,
    TargetSettings,
};
use crate::bundler::error::ErrorExt;
use path_absolutize::Absolutize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default directory bundles are written to, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "bin/Bundled";

/// Builder for constructing [`Settings`].
///
/// Every field has a default, so `SettingsBuilder::new().build()` yields a
/// valid (if idle) configuration.
///
/// # Examples
///
/// ```no_run
/// use gamebundle::bundler::{SettingsBuilder, TargetKind};
///
/// # fn example() -> gamebundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project("Game/Game.csproj")
///     .build_target(TargetKind::Linux, true)
///     .runtime_id(TargetKind::Linux, "linux-musl-x64")
///     .build()?;
/// assert_eq!(settings.runtime_id(TargetKind::Linux), "linux-musl-x64");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    tool_directory: Option<PathBuf>,
    verbose: bool,
    targets: BTreeMap<TargetKind, TargetSettings>,
    publish: PublishSettings,
    library: LibrarySettings,
    mac_bundle: MacBundleSettings,
    naming: NamingSettings,
    zip: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project file to publish.
    ///
    /// Default: None (discover a project file in the current directory)
    pub fn project<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory. Relative paths are resolved against the
    /// current directory when building.
    ///
    /// Default: `bin/Bundled`
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory external tools are restored and run in.
    ///
    /// Default: directory of the running executable
    pub fn tool_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tool_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables or disables building one target kind.
    pub fn build_target(mut self, kind: TargetKind, build: bool) -> Self {
        self.targets.entry(kind).or_default().build = build;
        self
    }

    /// Overrides the runtime identifier of one target kind.
    pub fn runtime_id(mut self, kind: TargetKind, rid: impl Into<String>) -> Self {
        self.targets.entry(kind).or_default().runtime_id = Some(rid.into());
        self
    }

    pub fn publish_settings(mut self, settings: PublishSettings) -> Self {
        self.publish = settings;
        self
    }

    pub fn library_settings(mut self, settings: LibrarySettings) -> Self {
        self.library = settings;
        self
    }

    pub fn mac_bundle_settings(mut self, settings: MacBundleSettings) -> Self {
        self.mac_bundle = settings;
        self
    }

    pub fn naming_settings(mut self, settings: NamingSettings) -> Self {
        self.naming = settings;
        self
    }

    /// Archives every build directory into a zip.
    ///
    /// Default: false
    pub fn zip(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the build configuration or library folder name is
    /// empty, the library folder name is not a plain directory name, or the
    /// current directory or the running executable's location cannot be
    /// determined.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        if self.publish.configuration.trim().is_empty() {
            crate::bail!("build configuration must not be empty");
        }
        let folder = self.library.folder_name.as_str();
        if folder.is_empty() || folder.contains(['/', '\\']) || folder == "." || folder == ".." {
            crate::bail!("invalid library folder name `{}`", folder);
        }

        let output = self
            .output_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
        let output_directory = output
            .absolutize()
            .fs_context("resolving output directory", &output)?
            .into_owned();

        let tool_directory = match self.tool_directory {
            Some(dir) => dir,
            None => default_tool_directory()?,
        };

        Ok(Settings::new(
            self.project,
            output_directory,
            tool_directory,
            self.verbose,
            self.targets,
            self.publish,
            self.library,
            self.mac_bundle,
            self.naming,
            self.zip,
        ))
    }
}

fn default_tool_directory() -> crate::bundler::Result<PathBuf> {
    use crate::bundler::error::Context;

    let exe = std::env::current_exe().fs_context("locating running executable", ".")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("running executable has no parent directory")
}
