//! Stack config file resolution.
//!
//! A stack argument is either the path of an existing stack config file
//! (absolute, or relative to the stacks base path, with or without the
//! `.yaml`/`.yml` extension) or a logical name that is matched against every
//! file selected by `stacks.included_paths` minus `stacks.excluded_paths`.

use super::naming::derive_logical_name;
use crate::config::{CliConfiguration, StackType};
use crate::error::{AtmosError, Result};
use crate::paths::{normalize, to_slash};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as stack config files.
pub const STACK_FILE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Stack config files resolved for a stack argument.
///
/// `absolute_paths` and `relative_paths` have the same length and are
/// index-aligned; neither is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResolution {
    pub absolute_paths: Vec<PathBuf>,
    pub relative_paths: Vec<String>,
    pub kind: StackType,
}

/// A stack config file found under the stacks base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFile {
    pub absolute_path: PathBuf,
    /// Relative to the stacks base, `/`-separated, without extension.
    pub relative_path: String,
}

/// Resolve `stack` to its stack config files.
///
/// An empty `stack` selects every included, non-excluded file. Logical-name
/// matches are returned sorted by relative path, so the result is stable
/// across runs.
pub fn find_stack_config_files(config: &CliConfiguration, stack: &str) -> Result<StackResolution> {
    let base = &config.stacks_base_absolute_path;
    let stack = stack.trim();

    if !stack.is_empty()
        && let Some(file) = find_physical_stack_file(base, stack)
    {
        let relative_path =
            relative_stack_path(base, &file).unwrap_or_else(|| stack.to_string());
        return Ok(StackResolution {
            absolute_paths: vec![file],
            relative_paths: vec![relative_path],
            kind: StackType::Directory,
        });
    }

    let candidates = list_stack_config_files(
        base,
        &config.include_stack_absolute_paths,
        &config.exclude_stack_absolute_paths,
    )?;

    let mut absolute_paths = Vec::new();
    let mut relative_paths = Vec::new();
    for candidate in candidates {
        if stack.is_empty() || derive_logical_name(&candidate, &config.stacks.name_pattern)? == stack
        {
            absolute_paths.push(candidate.absolute_path);
            relative_paths.push(candidate.relative_path);
        }
    }

    if absolute_paths.is_empty() {
        return Err(AtmosError::StackNotFound {
            stack: stack.to_string(),
            searched: config.include_stack_absolute_paths.clone(),
        });
    }

    Ok(StackResolution {
        absolute_paths,
        relative_paths,
        kind: StackType::Logical,
    })
}

/// Probe `stack` as a file path under `base`.
fn find_physical_stack_file(base: &Path, stack: &str) -> Option<PathBuf> {
    let candidate = if Path::new(stack).is_absolute() {
        normalize(Path::new(stack))
    } else {
        normalize(&base.join(stack))
    };

    let with_extensions = STACK_FILE_EXTENSIONS.iter().map(|ext| {
        let mut path = OsString::from(candidate.as_os_str());
        path.push(".");
        path.push(ext);
        PathBuf::from(path)
    });

    std::iter::once(candidate.clone())
        .chain(with_extensions)
        .find(|path| path.is_file())
}

/// Every stack config file under `base` matched by `include` and not by `exclude`,
/// sorted by relative path.
pub fn list_stack_config_files(
    base: &Path,
    include: &[PathBuf],
    exclude: &[PathBuf],
) -> Result<Vec<StackFile>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let include_set = build_globset(base, include)?;
    let exclude_set = build_globset(base, exclude)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(base).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            AtmosError::UserError(format!(
                "failed to read stacks directory '{}': {}",
                base.display(),
                e
            ))
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_stack_extension(path) {
            continue;
        }

        let slash_path = to_slash(path);
        if !include_set.is_match(&slash_path) || exclude_set.is_match(&slash_path) {
            continue;
        }

        if let Some(relative_path) = relative_stack_path(base, path) {
            files.push(StackFile {
                absolute_path: path.to_path_buf(),
                relative_path,
            });
        }
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

/// `base/orgs/acme/dev.yaml` -> `orgs/acme/dev`
fn relative_stack_path(base: &Path, file: &Path) -> Option<String> {
    let relative = to_slash(file.strip_prefix(base).ok()?);
    let trimmed = STACK_FILE_EXTENSIONS
        .iter()
        .find_map(|ext| relative.strip_suffix(&format!(".{}", ext)))
        .unwrap_or(&relative);
    Some(trimmed.to_string())
}

fn has_stack_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| STACK_FILE_EXTENSIONS.contains(&ext))
}

/// `*` stays within one path segment; `**` crosses segments.
///
/// Patterns under `base` keep `base` itself literal, so a checkout path
/// containing `[`, `{`, `*` or `?` still matches.
fn build_globset(base: &Path, patterns: &[PathBuf]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let literal_base = globset::escape(to_slash(base).trim_end_matches('/'));

    for pattern in patterns {
        if to_slash(pattern).trim().is_empty() {
            continue;
        }
        let normalized = match pattern.strip_prefix(base) {
            Ok(relative) => format!("{}/{}", literal_base, to_slash(relative)),
            Err(_) => to_slash(pattern),
        };
        let glob = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                AtmosError::InvalidConfig(format!(
                    "invalid stack path pattern '{}': {}",
                    normalized, e
                ))
            })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| {
        AtmosError::InvalidConfig(format!("failed to compile stack path patterns: {}", e))
    })
}
