//! Core Settings struct and implementations.

use super::{
    LibrarySettings, MacBundleSettings, NamingSettings, PublishSettings, TargetKind,
    TargetSettings,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main settings for a bundling run.
///
/// Immutable once built; constructed via [`SettingsBuilder`] and passed by
/// reference to the planner, the pipeline and the naming resolver.
///
/// # Examples
///
/// ```no_run
/// use gamebundle::bundler::{SettingsBuilder, TargetKind};
///
/// # fn example() -> gamebundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_directory("bin/Bundled")
///     .build_target(TargetKind::Windows, true)
///     .build_target(TargetKind::Mac, true)
///     .zip(true)
///     .build()?;
/// assert!(settings.target(TargetKind::Mac).build);
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project file to publish. None means discover one in the current directory.
    project: Option<PathBuf>,

    /// Absolute directory the build directories are created in.
    output_directory: PathBuf,

    /// Directory external tools are restored and run in.
    tool_directory: PathBuf,

    /// Echo external commands and their exit codes.
    verbose: bool,

    /// Per-target build toggles and runtime identifier overrides.
    targets: BTreeMap<TargetKind, TargetSettings>,

    publish: PublishSettings,
    library: LibrarySettings,
    mac_bundle: MacBundleSettings,
    naming: NamingSettings,

    /// Archive each build directory into a zip next to it.
    zip: bool,
}

impl Settings {
    /// Returns the explicitly configured project file, if any.
    pub fn project(&self) -> Option<&Path> {
        self.project.as_deref()
    }

    /// Returns the absolute output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the directory external tools run in.
    pub fn tool_directory(&self) -> &Path {
        &self.tool_directory
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the settings for one target kind.
    pub fn target(&self, kind: TargetKind) -> &TargetSettings {
        static DISABLED: TargetSettings = TargetSettings {
            build: false,
            runtime_id: None,
        };
        self.targets.get(&kind).unwrap_or(&DISABLED)
    }

    /// Runtime identifier for a target kind: the override if set, else the default.
    pub fn runtime_id(&self, kind: TargetKind) -> String {
        self.target(kind)
            .runtime_id
            .clone()
            .unwrap_or_else(|| kind.default_runtime_id(self.publish.publish_32_bit).to_string())
    }

    pub fn publish(&self) -> &PublishSettings {
        &self.publish
    }

    pub fn library(&self) -> &LibrarySettings {
        &self.library
    }

    pub fn mac_bundle(&self) -> &MacBundleSettings {
        &self.mac_bundle
    }

    pub fn naming(&self) -> &NamingSettings {
        &self.naming
    }

    pub fn zip(&self) -> bool {
        self.zip
    }

    /// Returns the build directory for a target's output subdirectory name.
    ///
    /// The name addition, if configured, is prefixed as `<addition>-<dir_name>`.
    pub fn build_directory(&self, dir_name: &str) -> PathBuf {
        let name = match &self.naming.name_addition {
            Some(addition) => format!("{addition}-{dir_name}"),
            None => dir_name.to_string(),
        };
        self.output_directory.join(name)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        project: Option<PathBuf>,
        output_directory: PathBuf,
        tool_directory: PathBuf,
        verbose: bool,
        targets: BTreeMap<TargetKind, TargetSettings>,
        publish: PublishSettings,
        library: LibrarySettings,
        mac_bundle: MacBundleSettings,
        naming: NamingSettings,
        zip: bool,
    ) -> Self {
        Self {
            project,
            output_directory,
            tool_directory,
            verbose,
            targets,
            publish,
            library,
            mac_bundle,
            naming,
            zip,
        }
    }
}
