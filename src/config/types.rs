//! Configuration types and defaults for atmos.
//!
//! This module defines enums, default value functions, and the invocation
//! payload that carries command-line and embedding-caller overrides into the
//! config loader.

use serde::{Deserialize, Serialize};

/// Kind of component a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Terraform,
    Helmfile,
}

impl ComponentType {
    /// The key used for this component type under `components:` in stack files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Terraform => "terraform",
            ComponentType::Helmfile => "helmfile",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the requested stack was matched to stack config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackType {
    /// The stack argument named an existing stack config file.
    Directory,
    /// The stack argument was a logical name resolved by search.
    Logical,
}

/// Overrides supplied for a single invocation.
///
/// Populated from command-line flags by the CLI layer, or directly by a
/// caller embedding atmos as a library (e.g. a Terraform provider). `None`
/// and empty strings mean "not specified".
#[derive(Debug, Clone, Default)]
pub struct ConfigAndStacksInfo {
    /// Stack requested with `-s/--stack` (logical name or file path).
    pub stack: String,

    /// `--base-path`
    pub base_path: Option<String>,
    /// `--config-dir`: overrides `stacks.base_path`.
    pub config_dir: Option<String>,
    /// `--stacks-dir`: overrides `stacks.base_path` (wins over `--config-dir`).
    pub stacks_dir: Option<String>,
    /// `--terraform-dir`
    pub terraform_dir: Option<String>,
    /// `--terraform-command`
    pub terraform_command: Option<String>,
    /// `--helmfile-dir`
    pub helmfile_dir: Option<String>,
    /// `--helmfile-command`
    pub helmfile_command: Option<String>,
    /// `--workflows-dir`
    pub workflows_dir: Option<String>,
    /// `--deploy-run-init`
    pub deploy_run_init: Option<bool>,
    /// `--auto-generate-backend-file`
    pub auto_generate_backend_file: Option<bool>,
    /// `--logs-verbose`
    pub logs_verbose: Option<bool>,

    /// Base path set by an embedding caller; beats every other source.
    pub atmos_base_path: Option<String>,
    /// Extra config directory set by an embedding caller (fifth tier).
    pub atmos_cli_config_path: Option<String>,
}

impl ConfigAndStacksInfo {
    /// Payload with only the stack set.
    pub fn for_stack(stack: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            ..Default::default()
        }
    }
}

// Default value functions for serde
pub(crate) fn default_terraform_command() -> String {
    "terraform".to_string()
}
pub(crate) fn default_helmfile_command() -> String {
    "helmfile".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
