//! Settings for the publish and library extraction stages.

/// Shared libraries of common audio and windowing backends that must stay
/// next to the executable instead of being moved into the library folder.
pub const KNOWN_NATIVE_EXCLUSIONS: [&str; 10] = [
    // windows
    "soft_oal.dll",
    "openal.dll",
    "SDL2.dll",
    // linux
    "libopenal.so.1",
    "libopenal.so",
    "libSDL2-2.0.so.0",
    // mac
    "libopenal.1.dylib",
    "libopenal.dylib",
    "libSDL2.dylib",
    "libSDL2-2.0.0.dylib",
];

/// Per-target toggle and runtime identifier override.
#[derive(Clone, Debug, Default)]
pub struct TargetSettings {
    /// Build this target.
    pub build: bool,

    /// Runtime identifier to publish for instead of the platform default.
    pub runtime_id: Option<String>,
}

/// Options passed to `dotnet publish`.
#[derive(Clone, Debug)]
pub struct PublishSettings {
    /// Build configuration name.
    ///
    /// Default: `Release`
    pub configuration: String,

    /// Trim unused code from the self-contained publish.
    ///
    /// Default: true
    pub trim: bool,

    /// Publish ahead-of-time compiled native binaries. Implies trimming and
    /// disables library extraction.
    ///
    /// Default: false
    pub aot: bool,

    /// Publish for 32-bit instead of 64-bit (Windows only).
    ///
    /// Default: false
    pub publish_32_bit: bool,

    /// Extra arguments appended to the publish command, split on whitespace.
    ///
    /// Default: None
    pub extra_args: Option<String>,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            configuration: "Release".to_string(),
            trim: true,
            aot: false,
            publish_32_bit: false,
            extra_args: None,
        }
    }
}

impl PublishSettings {
    /// Whether the publish is trimmed, which AOT forces on.
    pub fn trimmed(&self) -> bool {
        self.trim || self.aot
    }
}

/// Options for moving shared libraries into a subfolder.
#[derive(Clone, Debug)]
pub struct LibrarySettings {
    /// Name of the folder shared libraries are moved into.
    ///
    /// Default: `Lib`
    pub folder_name: String,

    /// Skip library extraction for every target.
    ///
    /// Default: false
    pub skip: bool,

    /// Files that stay next to the executable.
    ///
    /// Default: Empty
    pub exclusions: Vec<String>,

    /// Also keep [`KNOWN_NATIVE_EXCLUSIONS`] next to the executable.
    ///
    /// Default: false
    pub known_native_exclusions: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folder_name: "Lib".to_string(),
            skip: false,
            exclusions: Vec::new(),
            known_native_exclusions: false,
        }
    }
}

impl LibrarySettings {
    /// User exclusions followed by the known native-library exclusions, if enabled.
    pub fn combined_exclusions(&self) -> Vec<String> {
        let mut exclusions = self.exclusions.clone();
        if self.known_native_exclusions {
            exclusions.extend(KNOWN_NATIVE_EXCLUSIONS.iter().map(|s| s.to_string()));
        }
        exclusions
    }
}

/// Options that change the names of the produced build directories.
#[derive(Clone, Debug, Default)]
pub struct NamingSettings {
    /// Prefix each build directory with the executable's name.
    pub name_builds: bool,

    /// Literal prefix added to every build directory name.
    pub name_addition: Option<String>,

    /// Prefix each build directory with the build's version.
    pub include_version: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_exclusions_follow_user_exclusions() {
        let library = LibrarySettings {
            exclusions: vec!["steam_api64.dll".into()],
            known_native_exclusions: true,
            ..Default::default()
        };
        let combined = library.combined_exclusions();
        assert_eq!(combined.len(), 11);
        assert_eq!(combined[0], "steam_api64.dll");
        assert!(combined.contains(&"libSDL2-2.0.so.0".to_string()));
        assert!(combined.contains(&"soft_oal.dll".to_string()));
    }

    #[test]
    fn aot_forces_trimming() {
        let publish = PublishSettings {
            trim: false,
            aot: true,
            ..Default::default()
        };
        assert!(publish.trimmed());
        assert!(!PublishSettings {
            trim: false,
            ..Default::default()
        }
        .trimmed());
    }
}
