//! Project file resolution

use crate::bundler::{Error, Result, error::ErrorExt};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Resolves the project file to publish.
///
/// An explicit path must exist. Without one, `search_dir` is scanned for the
/// first file (by name) whose extension contains `proj`, e.g. `Game.csproj`
/// or `Game.fsproj`.
pub async fn find_project_file(explicit: Option<&Path>, search_dir: &Path) -> Result<PathBuf> {
    let project = match explicit {
        Some(path) => path.to_path_buf(),
        None => discover(search_dir).await?.ok_or_else(|| Error::ProjectNotFound {
            path: search_dir.to_path_buf(),
        })?,
    };

    if !tokio::fs::metadata(&project)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
    {
        return Err(Error::ProjectNotFound { path: project });
    }

    Ok(project
        .absolutize()
        .fs_context("resolving project path", &project)?
        .into_owned())
}

async fn discover(dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .fs_context("scanning for project file", dir)?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("scanning for project file", dir)?
    {
        let path = entry.path();
        let is_project = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().contains("proj"));
        if is_project && entry.file_type().await.is_ok_and(|t| t.is_file()) {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}
