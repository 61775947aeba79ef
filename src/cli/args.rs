//! Command line argument parsing.
//!
//! Every flag maps onto one field of the immutable [`Settings`]; nothing is
//! read after [`Args::to_settings`] returns.

use crate::bundler::{
    LibrarySettings, MacBundleSettings, NamingSettings, PublishSettings, Result, Settings,
    SettingsBuilder, TargetKind,
    settings::{DEFAULT_OUTPUT_DIRECTORY, DEFAULT_RESOURCE_PATTERNS},
};
use clap::Parser;
use std::path::PathBuf;

/// Publishes a game project for several platforms and packages the results
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gamebundle",
    version,
    about = "Publishes self-contained game builds for several platforms",
    long_about = "Publishes a project as self-contained builds for each selected platform, moves \
shared libraries into a library folder, optionally turns mac builds into .app bundles and \
optionally zips the results.

Usage:
  gamebundle -wlm
  gamebundle -s Game/Game.csproj -m --mac-arm -b -z
  gamebundle -l -n -N demo --include-version -o dist

Exit code 0 = every selected target was built."
)]
pub struct Args {
    /// Project file to publish; defaults to the first *proj file in the current directory
    #[arg(short = 's', long, value_name = "PROJECT", env = "GAMEBUNDLE_SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory the builds are written to
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIRECTORY,
        env = "GAMEBUNDLE_OUTPUT"
    )]
    pub output: PathBuf,

    /// Echo every external command and its exit code
    #[arg(short, long)]
    pub verbose: bool,

    /// Build for windows
    #[arg(short = 'w', long)]
    pub win: bool,

    /// Build for linux
    #[arg(short = 'l', long)]
    pub linux: bool,

    /// Build for mac
    #[arg(short = 'm', long)]
    pub mac: bool,

    /// Build for windows arm
    #[arg(long)]
    pub win_arm: bool,

    /// Build for linux arm
    #[arg(long)]
    pub linux_arm: bool,

    /// Build for mac arm
    #[arg(long)]
    pub mac_arm: bool,

    /// Runtime identifier for windows builds [default: win-x64, win-x86 with --32-bit]
    #[arg(long, value_name = "RID")]
    pub win_rid: Option<String>,

    /// Runtime identifier for linux builds [default: linux-x64]
    #[arg(long, value_name = "RID")]
    pub linux_rid: Option<String>,

    /// Runtime identifier for mac builds [default: osx-x64]
    #[arg(long, value_name = "RID")]
    pub mac_rid: Option<String>,

    /// Runtime identifier for windows arm builds [default: win-arm64]
    #[arg(long, value_name = "RID")]
    pub win_arm_rid: Option<String>,

    /// Runtime identifier for linux arm builds [default: linux-arm64]
    #[arg(long, value_name = "RID")]
    pub linux_arm_rid: Option<String>,

    /// Runtime identifier for mac arm builds [default: osx-arm64]
    #[arg(long, value_name = "RID")]
    pub mac_arm_rid: Option<String>,

    /// Publish 32-bit windows builds
    #[arg(long = "32-bit")]
    pub publish_32_bit: bool,

    /// Don't trim unused code from the builds
    #[arg(short = 't', long)]
    pub no_trim: bool,

    /// Publish ahead-of-time compiled builds; implies trimming and skips library extraction
    #[arg(long)]
    pub aot: bool,

    /// Build configuration
    #[arg(
        short = 'c',
        long,
        value_name = "CONFIG",
        default_value = "Release",
        env = "GAMEBUNDLE_CONFIG"
    )]
    pub config: String,

    /// Extra arguments appended to the publish command
    #[arg(
        short = 'a',
        long,
        value_name = "ARGS",
        allow_hyphen_values = true,
        env = "GAMEBUNDLE_BUILD_ARGS"
    )]
    pub build_args: Option<String>,

    /// Name of the folder shared libraries are moved to
    #[arg(short = 'L', long, value_name = "NAME", default_value = "Lib")]
    pub lib_name: String,

    /// Leave shared libraries next to the executable
    #[arg(long)]
    pub skip_lib: bool,

    /// Files kept out of the library folder (comma separated)
    #[arg(short = 'e', long, value_name = "FILES", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Also keep the usual audio and SDL native libraries out of the library folder
    #[arg(long)]
    pub mg: bool,

    /// Zip each build and delete its directory
    #[arg(short = 'z', long)]
    pub zip: bool,

    /// Turn mac builds into .app bundles
    #[arg(short = 'b', long)]
    pub mac_bundle: bool,

    /// Files and directories moved to the bundle's Resources folder (comma separated globs)
    #[arg(
        long,
        value_name = "GLOBS",
        value_delimiter = ',',
        default_values_t = DEFAULT_RESOURCE_PATTERNS.map(String::from)
    )]
    pub mac_bundle_resources: Vec<String>,

    /// Files and directories left where they are when bundling (comma separated globs)
    #[arg(long, value_name = "GLOBS", value_delimiter = ',')]
    pub mac_bundle_ignore: Vec<String>,

    /// Prefix each build directory with the executable's name
    #[arg(short = 'n', long)]
    pub name_builds: bool,

    /// Text prepended to each build directory name
    #[arg(short = 'N', long, value_name = "TEXT")]
    pub name_addition: Option<String>,

    /// Prefix each build directory with the application version
    #[arg(long)]
    pub include_version: bool,

    /// Print the build plan as JSON and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build toggle and runtime identifier override for `kind`.
    fn target(&self, kind: TargetKind) -> (bool, Option<&String>) {
        match kind {
            TargetKind::Windows => (self.win, self.win_rid.as_ref()),
            TargetKind::Linux => (self.linux, self.linux_rid.as_ref()),
            TargetKind::Mac => (self.mac, self.mac_rid.as_ref()),
            TargetKind::WindowsArm => (self.win_arm, self.win_arm_rid.as_ref()),
            TargetKind::LinuxArm => (self.linux_arm, self.linux_arm_rid.as_ref()),
            TargetKind::MacArm => (self.mac_arm, self.mac_arm_rid.as_ref()),
        }
    }

    /// Converts the arguments into immutable settings.
    pub fn to_settings(&self) -> Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .output_directory(&self.output)
            .verbose(self.verbose)
            .publish_settings(PublishSettings {
                configuration: self.config.clone(),
                trim: !self.no_trim,
                aot: self.aot,
                publish_32_bit: self.publish_32_bit,
                extra_args: self.build_args.clone(),
            })
            .library_settings(LibrarySettings {
                folder_name: self.lib_name.clone(),
                skip: self.skip_lib,
                exclusions: non_empty(&self.exclude),
                known_native_exclusions: self.mg,
            })
            .mac_bundle_settings(MacBundleSettings {
                enabled: self.mac_bundle,
                resources: non_empty(&self.mac_bundle_resources),
                ignore: non_empty(&self.mac_bundle_ignore),
            })
            .naming_settings(NamingSettings {
                name_builds: self.name_builds,
                name_addition: self.name_addition.clone().filter(|a| !a.is_empty()),
                include_version: self.include_version,
            })
            .zip(self.zip);

        if let Some(source) = &self.source {
            builder = builder.project(source);
        }
        for kind in TargetKind::ALL {
            let (build, rid) = self.target(kind);
            builder = builder.build_target(kind, build);
            if let Some(rid) = rid {
                builder = builder.runtime_id(kind, rid.as_str());
            }
        }

        builder.build()
    }
}

fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
