//! Lookup helpers for the rsync executable.
//!
//! A missing binary only surfaces once the shell fails to run it. These
//! helpers let callers check ahead of time and produce a readable hint.

use std::collections::HashSet;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Returns the candidate paths `binary` may resolve to.
///
/// A value containing a path separator yields just that path (plus `PATHEXT`
/// variants on Windows). A bare name is expanded across every directory in
/// `PATH`, in search order and without duplicates.
#[must_use]
pub fn executable_candidates(binary: &OsStr) -> Vec<PathBuf> {
    let direct_path = Path::new(binary);
    if has_explicit_path(direct_path) {
        return candidates_for_explicit_path(direct_path);
    }

    let Some(path_env) = env::var_os("PATH") else {
        return Vec::new();
    };

    let extensions = executable_extensions(direct_path);
    let mut results = Vec::new();
    let mut seen = HashSet::new();

    for dir in env::split_paths(&path_env) {
        let base = if dir.as_os_str().is_empty() {
            direct_path.to_path_buf()
        } else {
            dir.join(direct_path)
        };
        for ext in &extensions {
            if let Some(candidate) = apply_extension(&base, ext) {
                if seen.insert(candidate.clone()) {
                    results.push(candidate);
                }
            }
        }
    }

    results
}

/// Returns the first candidate for `binary` that is an executable file.
#[must_use]
pub fn resolve_executable(binary: &OsStr) -> Option<PathBuf> {
    executable_candidates(binary)
        .into_iter()
        .find(|candidate| candidate_is_executable(candidate))
}

/// Reports whether `binary` resolves to an executable file.
#[must_use]
pub fn executable_available(binary: &OsStr) -> bool {
    resolve_executable(binary).is_some()
}

/// Formats a diagnostic explaining that `binary` cannot be run.
#[must_use]
pub fn describe_missing_executable(binary: &OsStr) -> String {
    let display = Path::new(binary).display();
    format!(
        "rsync binary '{display}' is not available on PATH or is not executable; install rsync or configure an explicit executable path"
    )
}

fn has_explicit_path(path: &Path) -> bool {
    path.is_absolute() || path.components().count() > 1
}

#[cfg(windows)]
fn candidates_for_explicit_path(path: &Path) -> Vec<PathBuf> {
    let mut results = vec![path.to_path_buf()];
    for ext in executable_extensions(path) {
        if let Some(candidate) = apply_extension(path, &ext) {
            if !results.contains(&candidate) {
                results.push(candidate);
            }
        }
    }
    results
}

#[cfg(not(windows))]
fn candidates_for_explicit_path(path: &Path) -> Vec<PathBuf> {
    vec![path.to_path_buf()]
}

#[cfg(windows)]
fn executable_extensions(path: &Path) -> Vec<OsString> {
    if path.extension().is_some() {
        return vec![OsString::new()];
    }
    let pathext = env::var_os("PATHEXT").unwrap_or_else(|| OsString::from(".COM;.EXE;.BAT;.CMD"));
    let mut extensions = vec![OsString::new()];
    extensions.extend(
        pathext
            .to_string_lossy()
            .split(';')
            .filter(|ext| !ext.trim().is_empty())
            .map(OsString::from),
    );
    extensions
}

#[cfg(not(windows))]
fn executable_extensions(_path: &Path) -> Vec<OsString> {
    vec![OsString::new()]
}

fn apply_extension(base: &Path, ext: &OsStr) -> Option<PathBuf> {
    if ext.is_empty() {
        return Some(base.to_path_buf());
    }

    let ext_text = ext.to_string_lossy();
    let trimmed = ext_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let ext_without_dot = trimmed.strip_prefix('.').unwrap_or(trimmed);
    let mut candidate = base.to_path_buf();
    candidate.set_extension(ext_without_dot);
    Some(candidate)
}

fn candidate_is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        metadata.mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests;
