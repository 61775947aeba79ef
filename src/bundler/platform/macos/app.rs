//! macOS application bundle assembly.
//!
//! Restructures a flat publish output directory in place:
//!
//! ```text
//! <build>/
//! ├── <name>.app/
//! │   └── Contents/
//! │       ├── Info.plist, PkgInfo
//! │       ├── MacOS/       everything not otherwise classified
//! │       └── Resources/   entries matching the resource patterns
//! └── <ignored entries stay here>
//! ```
//!
//! Running the assembly again on its own output is a no-op apart from
//! entries that were added to the build directory in between.

use super::classify::{PKG_INFO, Placement, RuleSet};
use crate::bundler::{
    error::{ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Bundle type and creator codes written to `Contents/PkgInfo`.
pub const PKG_INFO_CONTENTS: &[u8; 8] = b"APPL????";

/// Paths of an assembled bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppBundle {
    pub app: PathBuf,
    pub contents: PathBuf,
    pub macos: PathBuf,
    pub resources: PathBuf,
}

impl AppBundle {
    fn new(build_dir: &Path, name: &str) -> Self {
        let app = build_dir.join(format!("{name}.app"));
        let contents = app.join("Contents");
        Self {
            macos: contents.join("MacOS"),
            resources: contents.join("Resources"),
            contents,
            app,
        }
    }

    fn destination(&self, placement: Placement) -> Option<&Path> {
        match placement {
            Placement::Ignored => None,
            Placement::Contents => Some(&self.contents),
            Placement::Resources => Some(&self.resources),
            Placement::MacOs => Some(&self.macos),
        }
    }
}

/// Turns `build_dir` into a build directory containing `<name>.app`.
///
/// # Process
///
/// 1. Creates `<name>.app/Contents/{MacOS,Resources}`
/// 2. Moves each top-level file according to [`RuleSet::classify_file`],
///    overwriting files of the same name
/// 3. Moves each top-level directory according to [`RuleSet::classify_dir`],
///    replacing existing directories of the same name
/// 4. Writes `Contents/PkgInfo` unless it already exists
pub async fn assemble(build_dir: &Path, rules: &RuleSet, name: &str) -> Result<AppBundle> {
    let bundle = AppBundle::new(build_dir, name);
    log::info!("Creating app bundle {}", bundle.app.display());

    fs::create_dir_all(&bundle.macos).await?;
    fs::create_dir_all(&bundle.resources).await?;

    let app_name = format!("{name}.app");
    let (files, dirs) = top_level_entries(build_dir).await?;

    for file_name in files {
        let Some(dest_dir) = bundle.destination(rules.classify_file(&file_name)) else {
            continue;
        };
        fs::move_file(&build_dir.join(&file_name), &dest_dir.join(&file_name)).await?;
    }

    for dir_name in dirs {
        if dir_name == app_name {
            continue;
        }
        let Some(dest_dir) = bundle.destination(rules.classify_dir(&dir_name)) else {
            continue;
        };
        fs::move_dir(&build_dir.join(&dir_name), &dest_dir.join(&dir_name)).await?;
    }

    let pkg_info = bundle.contents.join(PKG_INFO);
    if !tokio::fs::try_exists(&pkg_info).await.unwrap_or(false) {
        tokio::fs::write(&pkg_info, PKG_INFO_CONTENTS)
            .await
            .fs_context("writing package info", &pkg_info)?;
        log::info!("Creating package info at {}", pkg_info.display());
    }

    Ok(bundle)
}

/// Names of the files and directories directly inside `dir`, sorted.
async fn top_level_entries(dir: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .fs_context("reading build directory", dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading build directory", dir)?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry
            .file_type()
            .await
            .fs_context("reading file type", entry.path())?;
        if file_type.is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }

    files.sort();
    dirs.sort();
    Ok((files, dirs))
}
