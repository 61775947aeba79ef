//! macOS platform-specific settings.

/// Default patterns for files and folders placed in `Contents/Resources`.
pub const DEFAULT_RESOURCE_PATTERNS: [&str; 2] = ["Content", "*.icns"];

/// macOS application bundle (.app) configuration.
///
/// Controls whether mac targets are turned into `<name>.app` bundles after
/// publishing, and how the flat publish output is sorted into the bundle.
///
/// # Classification
///
/// Top-level entries of the build directory are matched by name against
/// the two pattern lists:
///
/// - `ignore` matches stay where they are, outside the bundle
/// - `resources` matches move to `Contents/Resources`
/// - everything else moves to `Contents/MacOS`
///
/// Patterns support `*` (any run of characters) and `?` (one character).
///
/// # See Also
///
/// - [`crate::bundler::platform::macos::RuleSet`] - compiled form of the patterns
#[derive(Clone, Debug)]
pub struct MacBundleSettings {
    /// Create an app bundle for mac targets.
    ///
    /// Default: false
    pub enabled: bool,

    /// Patterns for entries moved to `Contents/Resources`.
    ///
    /// Default: `["Content", "*.icns"]`
    pub resources: Vec<String>,

    /// Patterns for entries left outside the bundle.
    ///
    /// Default: Empty
    pub ignore: Vec<String>,
}

impl Default for MacBundleSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            resources: DEFAULT_RESOURCE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ignore: Vec::new(),
        }
    }
}
