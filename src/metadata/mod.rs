//! Build name and version discovery from publish output.
//!
//! A self-contained publish leaves the entry binary (`Game` or `Game.exe`)
//! next to a library of the same base name (`Game.dll`); that pair marks
//! the application. Ahead-of-time builds have no such library, so a lone
//! executable is accepted as the entry binary instead.

use crate::bundler::{
    Error, Result,
    error::NamingError,
    utils::process::{Invocation, ProcessRunner},
};
use std::path::{Path, PathBuf};

/// Extensions of executables; the empty string stands for "no extension".
pub const EXECUTABLE_EXTENSIONS: [&str; 2] = ["", "exe"];

/// Extensions of the library paired with the entry binary.
pub const LIBRARY_EXTENSIONS: [&str; 3] = ["dll", "so", "dylib"];

/// Splits a file name into base name and extension at the last dot.
///
/// A leading dot belongs to the extension, so `.DS_Store` has an empty base
/// name and is never taken for an extensionless executable.
fn split_extension(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let (_, ext) = split_extension(name);
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

fn is_executable(name: &str) -> bool {
    has_extension(name, &EXECUTABLE_EXTENSIONS)
}

fn is_library(name: &str) -> bool {
    has_extension(name, &LIBRARY_EXTENSIONS)
}

/// Picks the file that identifies the application among a directory's file names.
///
/// Returns the paired library if exactly one executable has one, otherwise
/// the only executable, otherwise an error naming the candidates.
pub fn select_entry_file(dir: &Path, file_names: &[String]) -> std::result::Result<String, NamingError> {
    let executables: Vec<&String> = file_names.iter().filter(|n| is_executable(n)).collect();

    let mut paired: Vec<&String> = file_names
        .iter()
        .filter(|n| is_library(n))
        .filter(|lib| {
            let (base, _) = split_extension(lib);
            executables.iter().any(|exe| split_extension(exe).0 == base)
        })
        .collect();
    paired.sort();

    match paired.as_slice() {
        [library] => return Ok((*library).clone()),
        [] => {}
        many => {
            return Err(NamingError::Ambiguous {
                dir: dir.to_path_buf(),
                candidates: many.iter().map(|n| split_extension(n).0.to_string()).collect(),
            });
        }
    }

    match executables.as_slice() {
        [exe] => Ok((*exe).clone()),
        [] => Err(NamingError::NotFound {
            dir: dir.to_path_buf(),
        }),
        many => {
            let mut candidates: Vec<String> = many.iter().map(|n| n.to_string()).collect();
            candidates.sort();
            Err(NamingError::Ambiguous {
                dir: dir.to_path_buf(),
                candidates,
            })
        }
    }
}

/// Finds the entry file of a published build directory.
pub async fn find_entry_file(build_dir: &Path) -> std::result::Result<PathBuf, NamingError> {
    let io_error = |error| NamingError::Io {
        path: build_dir.to_path_buf(),
        error,
    };

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(build_dir).await.map_err(io_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        if entry.file_type().await.map_err(io_error)?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    let entry = select_entry_file(build_dir, &names)?;
    log::debug!("Found entry file {} in {}", entry, build_dir.display());
    Ok(build_dir.join(entry))
}

/// Resolves the application's executable name from a published build directory.
pub async fn resolve_name(build_dir: &Path) -> std::result::Result<String, NamingError> {
    let entry = find_entry_file(build_dir).await?;
    let file_name = entry
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(split_extension(&file_name).0.to_string())
}

/// Resolves the build's version.
///
/// The product version embedded in the entry file is preferred. When the
/// entry file is not a PE image or carries no version resource, the project
/// is asked for its `Version` property instead. A build directory without a
/// single entry file is an error.
pub async fn resolve_version<R: ProcessRunner>(
    build_dir: &Path,
    project: &Path,
    runner: &R,
) -> Result<String> {
    if let Some(version) = embedded_version(build_dir).await? {
        return Ok(version);
    }
    log::debug!("No embedded version in {}", build_dir.display());
    project_version(project, runner).await
}

async fn embedded_version(build_dir: &Path) -> std::result::Result<Option<String>, NamingError> {
    let entry = find_entry_file(build_dir).await?;
    let image = tokio::fs::read(&entry).await.map_err(|error| NamingError::Io {
        path: entry.clone(),
        error,
    })?;

    match goblin::Object::parse(&image) {
        Ok(goblin::Object::PE(pe)) => Ok(product_version(pe)),
        _ => {
            log::debug!("{} is not a PE image", entry.display());
            Ok(None)
        }
    }
}

/// `ProductVersion` string of the image's version resource, if it has one.
fn product_version(pe: goblin::pe::PE<'_>) -> Option<String> {
    pe.resource_data
        .and_then(|resources| resources.version_info)
        .and_then(|info| info.string_info.product_version())
        .map(|version| version.trim_end_matches('\0').trim().to_string())
        .filter(|version| !version.is_empty())
}

/// Queries the project file's `Version` property through msbuild.
pub async fn project_version<R: ProcessRunner>(project: &Path, runner: &R) -> Result<String> {
    let invocation = Invocation::new("dotnet").args([
        "msbuild".to_string(),
        project.display().to_string(),
        "-getProperty:Version".to_string(),
    ]);
    let output = runner.run_capturing_output(&invocation).await?;
    let version = output.stdout.trim();

    if output.exit_code != 0 || version.is_empty() {
        return Err(Error::Naming(NamingError::MissingVersion {
            source_path: project.to_path_buf(),
        }));
    }
    Ok(version.to_string())
}
