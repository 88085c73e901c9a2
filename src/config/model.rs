//! CliConfiguration struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The finalized CLI configuration.
///
/// The file-settable fields mirror `atmos.yaml`. Unknown fields in the YAML
/// are ignored for forward compatibility. The derived fields are never read
/// from files; the loader fills them in and sets `initialized` last, after
/// which the struct is only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfiguration {
    /// Root every other relative path is resolved against.
    pub base_path: String,

    pub components: Components,

    pub stacks: Stacks,

    pub workflows: Workflows,

    pub logs: Logs,

    // =========================================================================
    // Derived at initialization
    // =========================================================================
    #[serde(skip_deserializing)]
    pub stacks_base_absolute_path: PathBuf,

    #[serde(skip_deserializing)]
    pub include_stack_absolute_paths: Vec<PathBuf>,

    #[serde(skip_deserializing)]
    pub exclude_stack_absolute_paths: Vec<PathBuf>,

    #[serde(skip_deserializing)]
    pub terraform_dir_absolute_path: PathBuf,

    #[serde(skip_deserializing)]
    pub helmfile_dir_absolute_path: PathBuf,

    #[serde(skip_deserializing)]
    pub workflows_dir_absolute_path: PathBuf,

    /// Stack config files resolved for the requested stack.
    #[serde(skip_deserializing)]
    pub stack_config_files_absolute_paths: Vec<PathBuf>,

    /// Same files relative to the stacks base path, without extension.
    #[serde(skip_deserializing)]
    pub stack_config_files_relative_paths: Vec<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub stack_type: Option<StackType>,

    #[serde(skip_deserializing)]
    pub initialized: bool,
}

/// Per-component-type settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    pub terraform: TerraformSettings,
    pub helmfile: HelmfileSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraformSettings {
    pub base_path: String,

    /// Executable invoked for terraform components.
    #[serde(default = "default_terraform_command")]
    pub command: String,

    pub apply_auto_approve: bool,

    pub deploy_run_init: bool,

    pub auto_generate_backend_file: bool,
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            command: default_terraform_command(),
            apply_auto_approve: false,
            deploy_run_init: false,
            auto_generate_backend_file: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelmfileSettings {
    pub base_path: String,

    /// Executable invoked for helmfile components.
    #[serde(default = "default_helmfile_command")]
    pub command: String,

    pub kubeconfig_path: String,

    pub helm_aws_profile_pattern: String,

    pub cluster_name_pattern: String,

    /// Whether helmfile components target EKS (default: true).
    #[serde(default = "default_true")]
    pub use_eks: bool,
}

impl Default for HelmfileSettings {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            command: default_helmfile_command(),
            kubeconfig_path: String::new(),
            helm_aws_profile_pattern: String::new(),
            cluster_name_pattern: String::new(),
            use_eks: default_true(),
        }
    }
}

/// Where stack config files live and which of them take part in resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stacks {
    pub base_path: String,

    /// Glob patterns relative to `base_path`.
    pub included_paths: Vec<String>,

    /// Glob patterns relative to `base_path`; a match removes the file.
    pub excluded_paths: Vec<String>,

    /// Optional logical stack name pattern, e.g. `{tenant}-{environment}-{stage}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name_pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflows {
    pub base_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logs {
    pub verbose: bool,
}

impl Default for CliConfiguration {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            components: Components::default(),
            stacks: Stacks::default(),
            workflows: Workflows::default(),
            logs: Logs::default(),
            stacks_base_absolute_path: PathBuf::new(),
            include_stack_absolute_paths: Vec::new(),
            exclude_stack_absolute_paths: Vec::new(),
            terraform_dir_absolute_path: PathBuf::new(),
            helmfile_dir_absolute_path: PathBuf::new(),
            workflows_dir_absolute_path: PathBuf::new(),
            stack_config_files_absolute_paths: Vec::new(),
            stack_config_files_relative_paths: Vec::new(),
            stack_type: None,
            initialized: false,
        }
    }
}
