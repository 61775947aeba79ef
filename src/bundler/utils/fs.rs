//! File system utilities for bundling.
//!
//! Moves are replace-not-merge: an existing destination is deleted before
//! the source is moved onto it. Nothing here is transactional; a failure
//! halfway through leaves whatever state the filesystem is in.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path. Existing directories are kept.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Moves a directory to `to`, deleting anything already there first.
///
/// The destination ends up with exactly the source's content; nothing is
/// merged from a previous destination.
pub async fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if fs::try_exists(to).await.unwrap_or(false) {
        log::debug!("Replacing existing directory {}", to.display());
        remove_dir_all(to).await?;
    }
    fs::rename(from, to)
        .await
        .fs_context("moving directory", from)
}

/// Moves a file to `to`, overwriting an existing file of the same name.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("moving file", from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn move_dir_replaces_instead_of_merging() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("win");
        let dst = tmp.path().join("1.0.0-win");

        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Game.exe"), "new").unwrap();
        std::fs::create_dir_all(dst.join("old")).unwrap();
        std::fs::write(dst.join("stale.txt"), "stale").unwrap();
        std::fs::write(dst.join("Game.exe"), "old").unwrap();

        move_dir(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert!(!dst.join("stale.txt").exists());
        assert!(!dst.join("old").exists());
        assert_eq!(std::fs::read_to_string(dst.join("Game.exe")).unwrap(), "new");
        assert_eq!(std::fs::read_dir(&dst).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn move_file_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        std::fs::write(&src, "a").unwrap();
        std::fs::write(&dst, "b").unwrap();

        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "a");
    }

    #[tokio::test]
    async fn removals_are_idempotent() {
        let tmp = TempDir::new().unwrap();
        remove_dir_all(&tmp.path().join("missing")).await.unwrap();
        remove_file(&tmp.path().join("missing.zip")).await.unwrap();
    }
}
