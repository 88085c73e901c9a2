//! Component variable files.
//!
//! `terraform generate varfile` writes a component's merged variables as
//! JSON (`.tfvars.json`); `helmfile generate varfile` writes them as YAML.

use crate::config::{CliConfiguration, ComponentType};
use crate::error::{AtmosError, Result};
use crate::fs::atomic_write_file;
use crate::paths::absolutize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default varfile location for `component` in `stack`.
///
/// `<component_dir>/<component>/<stack>-<component>.<suffix>`, with `/` in the
/// stack replaced by `-` so a path-style stack argument stays one file name.
pub fn default_varfile_path(
    config: &CliConfiguration,
    component_type: ComponentType,
    component: &str,
    stack: &str,
) -> PathBuf {
    let stack = stack.replace(['/', '\\'], "-");
    let suffix = match component_type {
        ComponentType::Terraform => "terraform.tfvars.json",
        ComponentType::Helmfile => "helmfile.vars.yaml",
    };

    config
        .component_dir(component_type)
        .join(component)
        .join(format!("{}-{}.{}", stack, component, suffix))
}

/// Where the varfile goes: `file` if given (relative to the working
/// directory), otherwise [`default_varfile_path`].
pub fn varfile_path(
    config: &CliConfiguration,
    component_type: ComponentType,
    component: &str,
    stack: &str,
    file: Option<&str>,
) -> Result<PathBuf> {
    match file.filter(|f| !f.trim().is_empty()) {
        Some(file) => absolutize(Path::new(file)),
        None => Ok(default_varfile_path(config, component_type, component, stack)),
    }
}

/// Render `vars` in the format used for `component_type`.
pub fn render_varfile(component_type: ComponentType, vars: &Value) -> Result<String> {
    match component_type {
        ComponentType::Terraform => serde_json::to_string_pretty(vars)
            .map(|json| json + "\n")
            .map_err(|e| AtmosError::UserError(format!("failed to render varfile as JSON: {}", e))),
        ComponentType::Helmfile => serde_yaml::to_string(vars)
            .map_err(|e| AtmosError::UserError(format!("failed to render varfile as YAML: {}", e))),
    }
}

/// Write `vars` to `path`. Under `dry_run` nothing is written.
pub fn write_varfile(
    path: &Path,
    component_type: ComponentType,
    vars: &Value,
    dry_run: bool,
) -> Result<()> {
    let content = render_varfile(component_type, vars)?;

    if dry_run {
        info!("Dry run: not writing varfile '{}'", path.display());
        return Ok(());
    }

    atomic_write_file(path, &content)?;
    info!("Wrote varfile '{}'", path.display());
    Ok(())
}
