//! Logical stack names.
//!
//! A stack file's logical name comes from `stacks.name_pattern` when one is
//! configured and the file's top-level `vars` supply every token; otherwise
//! it is the file's path relative to the stacks base, without extension, with
//! `/` replaced by `-` (`orgs/acme/dev.yaml` becomes `orgs-acme-dev`).

use super::locator::StackFile;
use crate::error::{AtmosError, Result};
use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::LazyLock;

/// Matches `{token}` placeholders in a name pattern.
static NAME_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_.-]+)\}").expect("Invalid name token regex"));

/// Logical name of `file` under `name_pattern` (which may be empty).
pub fn derive_logical_name(file: &StackFile, name_pattern: &str) -> Result<String> {
    if name_pattern.trim().is_empty() {
        return Ok(logical_name_from_path(&file.relative_path));
    }

    let vars = read_stack_vars(&file.absolute_path)?;
    Ok(logical_name_from_pattern(name_pattern, &vars)
        .unwrap_or_else(|| logical_name_from_path(&file.relative_path)))
}

/// `orgs/acme/dev` -> `orgs-acme-dev`
pub fn logical_name_from_path(relative_path: &str) -> String {
    relative_path.replace(['/', '\\'], "-")
}

/// Substitute `{token}` placeholders from `vars`.
///
/// Returns `None` if any token has no scalar value in `vars`.
pub fn logical_name_from_pattern(pattern: &str, vars: &Mapping) -> Option<String> {
    let mut missing = false;
    let name = NAME_TOKEN_REGEX.replace_all(pattern, |caps: &Captures| {
        match vars.get(&caps[1]).and_then(scalar_to_string) {
            Some(value) => value,
            None => {
                missing = true;
                String::new()
            }
        }
    });

    if missing { None } else { Some(name.into_owned()) }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Top-level `vars` of a stack file (empty if absent).
fn read_stack_vars(path: &Path) -> Result<Mapping> {
    let document = super::processor::load_stack_file(path)?;
    match document.get("vars") {
        Some(Value::Mapping(vars)) => Ok(vars.clone()),
        Some(Value::Null) | None => Ok(Mapping::new()),
        Some(_) => Err(AtmosError::UserError(format!(
            "invalid stack config file '{}': 'vars' must be a mapping",
            path.display()
        ))),
    }
}
