//! Error types for the atmos CLI.
//!
//! Uses thiserror for derive macros. Every message carries the context that
//! was assembled where the error was raised (paths searched, step names, ...).

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// URL of a sample CLI config printed with [`AtmosError::ConfigNotFound`].
pub const SAMPLE_CONFIG_URL: &str =
    "https://raw.githubusercontent.com/cloudposse/atmos/master/examples/complete/atmos.yaml";

/// Main error type for atmos operations.
#[derive(Error, Debug)]
pub enum AtmosError {
    /// None of the config tiers contained an `atmos.yaml`.
    #[error(
        "'atmos.yaml' CLI config files not found in any of the searched paths: \
         system dir, home dir, current dir, ENV vars, provider config path.\n\
         Searched:\n{}\n\
         You can download a sample config and adapt it to your requirements from {}",
        format_paths(.searched),
        SAMPLE_CONFIG_URL
    )]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// A config file exists but could not be read or parsed.
    #[error("failed to load CLI config '{}': {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// An environment variable or flag carried a value of the wrong shape.
    #[error("invalid value '{value}' for {source_name}: {message}")]
    InvalidValue {
        source_name: String,
        value: String,
        message: String,
    },

    /// The merged configuration is missing a required setting.
    #[error("invalid CLI config: {0}")]
    InvalidConfig(String),

    /// The OS could not resolve the working or home directory.
    #[error("failed to resolve path: {0}")]
    PathResolution(String),

    /// No stack config file matched the requested stack.
    #[error(
        "no stack config files found for the stack '{stack}' in the provided paths:\n{}\n\
         Check if 'base_path', 'stacks.base_path', 'stacks.included_paths' and \
         'stacks.excluded_paths' are correctly set in CLI config files or ENV vars.",
        format_paths(.searched)
    )]
    StackNotFound { stack: String, searched: Vec<PathBuf> },

    /// The requested component is not defined in the resolved stack.
    #[error("component '{component}' of type '{component_type}' not found in the stack '{stack}'")]
    ComponentNotFound {
        component: String,
        component_type: String,
        stack: String,
    },

    /// The workflow file does not define the requested workflow.
    #[error("the workflow manifest '{}' does not define the workflow '{workflow}'", .path.display())]
    WorkflowNotFound { workflow: String, path: PathBuf },

    /// The workflow has no steps.
    #[error("workflow '{0}' does not have any steps defined")]
    EmptyWorkflow(String),

    /// `--from-step` named a step that does not exist.
    #[error(
        "invalid '--from-step' flag. Workflow '{workflow}' does not have a step with the name '{step}'"
    )]
    InvalidFromStep { workflow: String, step: String },

    /// A workflow step declared an unknown type.
    #[error("invalid workflow step type '{0}'. Supported types are 'atmos' and 'shell'")]
    InvalidStepType(String),

    /// A dispatched step failed to spawn or exited unsuccessfully.
    #[error("workflow step '{step}' failed: {message}\nCommand: {command}")]
    StepExecution {
        step: String,
        command: String,
        message: String,
    },

    /// User provided invalid arguments or an unreadable input file.
    #[error("{0}")]
    UserError(String),
}

impl AtmosError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AtmosError::ConfigNotFound { .. }
            | AtmosError::ConfigParse { .. }
            | AtmosError::InvalidValue { .. }
            | AtmosError::InvalidConfig(_)
            | AtmosError::PathResolution(_) => exit_codes::CONFIG_FAILURE,
            AtmosError::StackNotFound { .. } | AtmosError::ComponentNotFound { .. } => {
                exit_codes::STACK_FAILURE
            }
            AtmosError::WorkflowNotFound { .. }
            | AtmosError::EmptyWorkflow(_)
            | AtmosError::InvalidFromStep { .. }
            | AtmosError::InvalidStepType(_)
            | AtmosError::StepExecution { .. } => exit_codes::WORKFLOW_FAILURE,
            AtmosError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for atmos operations.
pub type Result<T> = std::result::Result<T, AtmosError>;
