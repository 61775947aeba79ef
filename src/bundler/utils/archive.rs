//! Zip archive creation for finished builds.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

/// How archive entries are compressed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Compression {
    /// Deflate every entry.
    #[default]
    Deflate,
    /// Store entries uncompressed.
    Store,
}

impl Compression {
    fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflate => zip::CompressionMethod::Deflated,
            Compression::Store => zip::CompressionMethod::Stored,
        }
    }
}

/// Compresses `source` into a zip at `destination`.
///
/// Entries are stored under the source directory's own name, so extracting
/// the archive recreates the directory. Symbolic links are stored as links.
/// An existing file at `destination` is truncated. Every failure is reported
/// as [`Error::ArchiveFailed`].
pub async fn zip_dir(source: &Path, destination: &Path, compression: Compression) -> Result<()> {
    let source = source.to_path_buf();
    let destination = destination.to_path_buf();

    let task = {
        let source = source.clone();
        tokio::task::spawn_blocking(move || write_archive(&source, &destination, compression))
    };
    match task.await {
        Ok(result) => result.map_err(|e| archive_failure(&source, e)),
        Err(e) => Err(archive_error(&source, format!("archive task panicked: {e}"))),
    }
}

/// Wraps `error` as an [`Error::ArchiveFailed`] for `path`, keeping errors
/// that already are one.
pub fn archive_failure(path: &Path, error: Error) -> Error {
    match error {
        Error::ArchiveFailed { .. } => error,
        other => archive_error(path, other),
    }
}

fn write_archive(source: &Path, destination: &Path, compression: Compression) -> Result<()> {
    let base = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| archive_error(source, "directory has no name"))?;

    let file = File::create(destination).fs_context("creating archive", destination)?;
    let mut zip = zip::ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(compression.method());

    for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_error(source, e))?;
        let rel_path = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| archive_error(source, e))?;
        let name = entry_name(&base, rel_path);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
            continue;
        }

        if file_type.is_symlink() {
            let target = std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
            zip.add_symlink(name, target.to_string_lossy().into_owned(), options)?;
            continue;
        }

        #[allow(unused_mut)]
        let mut file_options = options;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = entry.metadata().map_err(|e| archive_error(source, e))?;
            file_options = file_options.unix_permissions(metadata.permissions().mode());
        }

        zip.start_file(name, file_options)?;
        let mut input = File::open(entry.path()).fs_context("reading file to archive", entry.path())?;
        io::copy(&mut input, &mut zip).fs_context("writing archive entry", entry.path())?;
    }

    zip.finish()?;
    Ok(())
}

/// Archive entry name for a path relative to the archived directory.
fn entry_name(base: &str, rel_path: &Path) -> String {
    let mut name = base.to_string();
    for component in rel_path.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

fn archive_error(path: &Path, reason: impl std::fmt::Display) -> Error {
    Error::ArchiveFailed {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}
