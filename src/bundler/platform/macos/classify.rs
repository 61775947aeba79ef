//! Name-based classification of build output for app bundles.
//!
//! Patterns are simple globs: `*` matches any run of characters, `?` exactly
//! one, everything else (including `.`) matches itself. Matching is done on
//! an entry's base name only and ignores ASCII case.

use crate::bundler::{
    error::{Context, Result},
    settings::MacBundleSettings,
};
use regex::Regex;

/// Marker file that always belongs in `Contents`.
pub const PKG_INFO: &str = "PkgInfo";

/// A single compiled glob pattern.
#[derive(Clone, Debug)]
pub struct GlobPattern {
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        // Escape first so `.` stays literal, then expand the wildcards.
        let expr = regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        let regex = Regex::new(&format!("(?i)^{expr}$"))
            .context(format!("invalid glob pattern `{pattern}`"))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Set of patterns; a name is a hit if any pattern matches it.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<GlobPattern>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| GlobPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches_any(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Where a top-level entry of the build directory goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    /// Left in place, outside the bundle.
    Ignored,
    /// `Contents` root (plist files and `PkgInfo`).
    Contents,
    /// `Contents/Resources`.
    Resources,
    /// `Contents/MacOS`.
    MacOs,
}

/// Resource and ignore patterns used to sort build output into a bundle.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    resources: PatternSet,
    ignore: PatternSet,
}

impl RuleSet {
    pub fn new<S: AsRef<str>>(resources: &[S], ignore: &[S]) -> Result<Self> {
        Ok(Self {
            resources: PatternSet::new(resources)?,
            ignore: PatternSet::new(ignore)?,
        })
    }

    pub fn from_settings(settings: &MacBundleSettings) -> Result<Self> {
        Self::new(&settings.resources, &settings.ignore)
    }

    /// Placement of a file.
    ///
    /// Precedence: ignore, then plist/`PkgInfo`, then resources, then MacOS.
    pub fn classify_file(&self, name: &str) -> Placement {
        if self.ignore.matches_any(name) {
            Placement::Ignored
        } else if name.ends_with("plist") || name == PKG_INFO {
            Placement::Contents
        } else if self.resources.matches_any(name) {
            Placement::Resources
        } else {
            Placement::MacOs
        }
    }

    /// Placement of a directory. Directories never go to the `Contents` root.
    pub fn classify_dir(&self, name: &str) -> Placement {
        if self.ignore.matches_any(name) {
            Placement::Ignored
        } else if self.resources.matches_any(name) {
            Placement::Resources
        } else {
            Placement::MacOs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::new(pattern).unwrap()
    }

    #[test]
    fn star_matches_any_run() {
        let icns = glob("*.icns");
        assert!(icns.matches("icon.icns"));
        assert!(icns.matches(".icns"));
        assert!(!icns.matches("icon.icnsx"));
        assert!(!icns.matches("icon.png"));
    }

    #[test]
    fn dot_is_literal() {
        let pattern = glob("a.b");
        assert!(pattern.matches("a.b"));
        assert!(!pattern.matches("axb"));
    }

    #[test]
    fn question_mark_matches_exactly_one() {
        let pattern = glob("lib?.so");
        assert!(pattern.matches("libA.so"));
        assert!(!pattern.matches("lib.so"));
        assert!(!pattern.matches("libAB.so"));
    }

    #[test]
    fn literal_pattern_matches_whole_name_only() {
        let content = glob("Content");
        assert!(content.matches("Content"));
        assert!(!content.matches("Contents"));
        assert!(!content.matches("MyContent"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(glob("*.ICNS").matches("icon.icns"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let pattern = glob("a+(b)[c]");
        assert!(pattern.matches("a+(b)[c]"));
        assert!(!pattern.matches("aa(b)c"));
    }

    #[test]
    fn ignore_wins_over_resources() {
        let rules = RuleSet::new(&["*.txt"], &["readme.txt"]).unwrap();
        assert_eq!(rules.classify_file("readme.txt"), Placement::Ignored);
        assert_eq!(rules.classify_file("notes.txt"), Placement::Resources);
        assert_eq!(rules.classify_dir("readme.txt"), Placement::Ignored);
    }

    #[test]
    fn plist_and_pkginfo_go_to_contents_even_when_resources_match() {
        let rules = RuleSet::new(&["*"], &[]).unwrap();
        assert_eq!(rules.classify_file("Info.plist"), Placement::Contents);
        assert_eq!(rules.classify_file(PKG_INFO), Placement::Contents);
        assert_eq!(rules.classify_file("Game"), Placement::Resources);
    }

    #[test]
    fn ignore_wins_over_plist_routing() {
        let rules = RuleSet::new(&[], &["*.plist", "PkgInfo"]).unwrap();
        assert_eq!(rules.classify_file("Info.plist"), Placement::Ignored);
        assert_eq!(rules.classify_file(PKG_INFO), Placement::Ignored);
    }

    #[test]
    fn unmatched_entries_go_to_macos() {
        let rules = RuleSet::from_settings(&MacBundleSettings::default()).unwrap();
        assert_eq!(rules.classify_file("Game"), Placement::MacOs);
        assert_eq!(rules.classify_file("Game.icns"), Placement::Resources);
        assert_eq!(rules.classify_dir("Content"), Placement::Resources);
        assert_eq!(rules.classify_dir("Lib"), Placement::MacOs);
    }

    #[test]
    fn directories_named_like_plists_are_not_contents() {
        let rules = RuleSet::new::<&str>(&[], &[]).unwrap();
        assert_eq!(rules.classify_dir("Settings.plist"), Placement::MacOs);
    }
}
