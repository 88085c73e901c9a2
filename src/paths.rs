//! Absolute path derivation for configured directories and glob patterns.
//!
//! Everything here is lexical: paths are made absolute against the current
//! working directory and `.`/`..` components are folded, but nothing is
//! canonicalized and symlinks are left alone. Glob patterns such as
//! `orgs/**/*` pass through untouched because they contain no `..`.

use crate::error::{AtmosError, Result};
use std::path::{Component, Path, PathBuf};

/// Join `rel` onto `base` and return the absolute, normalized result.
///
/// An empty `rel` yields `base` itself. An absolute `rel` is used as-is.
pub fn join_absolute_path<P: AsRef<Path>>(base: P, rel: &str) -> Result<PathBuf> {
    let base = base.as_ref();
    let joined = if rel.is_empty() {
        base.to_path_buf()
    } else {
        base.join(rel)
    };
    absolutize(&joined)
}

/// Join every entry of `rels` onto `base`, preserving order.
pub fn join_absolute_paths<P: AsRef<Path>>(base: P, rels: &[String]) -> Result<Vec<PathBuf>> {
    let base = base.as_ref();
    rels.iter()
        .map(|rel| join_absolute_path(base, rel))
        .collect()
}

/// Make `path` absolute against the current working directory and fold
/// `.` and `..` components.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir()?.join(path)
    };
    Ok(normalize(&absolute))
}

/// The process working directory, as a typed error when unavailable.
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        AtmosError::PathResolution(format!("failed to get current working directory: {}", e))
    })
}

/// The user's home directory, as a typed error when unavailable.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        AtmosError::PathResolution("failed to determine the user home directory".to_string())
    })
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root is dropped, matching how the OS resolves `/..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Render a path with forward slashes, as glob patterns expect.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
