//! macOS application bundles.
//!
//! - `classify` - glob patterns and the placement rules for bundle entries
//! - `app` - restructuring a publish output directory into `<name>.app`

mod app;
mod classify;

pub use app::{AppBundle, PKG_INFO_CONTENTS, assemble};
pub use classify::{GlobPattern, PKG_INFO, PatternSet, Placement, RuleSet};

use crate::bundler::{Result, settings::Settings};
use std::path::Path;

/// Bundles a published mac build directory as `<executable name>.app`.
///
/// The bundle name is the executable name resolved from the build output,
/// and the classification rules come from the mac bundle settings.
pub async fn bundle_project(build_dir: &Path, settings: &Settings) -> Result<AppBundle> {
    let name = crate::metadata::resolve_name(build_dir).await?;
    let rules = RuleSet::from_settings(settings.mac_bundle())?;
    assemble(build_dir, &rules, &name).await
}
