//! Workflow manifest model.
//!
//! A workflow manifest is a YAML file with a top-level `workflows` map:
//!
//! ```yaml
//! workflows:
//!   deploy-all:
//!     description: Deploy every component
//!     stack: acme-dev
//!     steps:
//!       - command: terraform deploy vpc
//!       - name: dns
//!         command: terraform deploy dns
//!         stack: acme-staging
//!       - type: shell
//!         command: echo done
//! ```

use crate::config::CliConfiguration;
use crate::error::{AtmosError, Result};
use crate::paths::join_absolute_path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A parsed workflow manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowFile {
    pub workflows: BTreeMap<String, WorkflowDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowDefinition {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Stack applied to every `atmos` step unless overridden.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stack: String,

    pub steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowStep {
    /// Empty until assigned; see [`super::normalize_step_names`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub command: String,

    /// `atmos` (default when empty) or `shell`.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub step_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub stack: String,
}

impl WorkflowFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            AtmosError::UserError(format!("failed to parse workflow manifest: {}", e))
        })
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AtmosError::UserError(format!(
                "failed to read workflow manifest '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            AtmosError::UserError(format!(
                "failed to parse workflow manifest '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Take the workflow named `name` out of the manifest.
    pub fn take_workflow(mut self, name: &str, path: &Path) -> Result<WorkflowDefinition> {
        self.workflows
            .remove(name)
            .ok_or_else(|| AtmosError::WorkflowNotFound {
                workflow: name.to_string(),
                path: path.to_path_buf(),
            })
    }
}

/// Absolute path of the workflow manifest named by `file`.
///
/// A relative `file` is resolved against the configured workflows directory,
/// and `.yaml` is appended when `file` has no extension.
pub fn resolve_workflow_path(config: &CliConfiguration, file: &str) -> Result<PathBuf> {
    let file = file.trim();
    if file.is_empty() {
        return Err(AtmosError::UserError(
            "'--file' is required: pass the workflow manifest with '-f <file>'".to_string(),
        ));
    }

    let mut path = join_absolute_path(&config.workflows_dir_absolute_path, file)?;
    if path.extension().is_none() {
        path.set_extension("yaml");
    }
    Ok(path)
}
