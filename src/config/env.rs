//! Snapshot of the environment variables atmos reads.
//!
//! The loader never calls `std::env::var` itself; it reads from an `EnvVars`
//! value so tests can substitute any environment without touching the
//! process.

use crate::error::{AtmosError, Result};
use std::collections::BTreeMap;

/// Directory holding an extra `atmos.yaml` (fourth config tier).
pub const CLI_CONFIG_PATH: &str = "ATMOS_CLI_CONFIG_PATH";
/// Windows per-user app data directory, used for the system tier.
pub const WINDOWS_APP_DATA: &str = "LOCALAPPDATA";

pub const LOGS_VERBOSE: &str = "ATMOS_LOGS_VERBOSE";
pub const BASE_PATH: &str = "ATMOS_BASE_PATH";
pub const STACKS_BASE_PATH: &str = "ATMOS_STACKS_BASE_PATH";
pub const STACKS_INCLUDED_PATHS: &str = "ATMOS_STACKS_INCLUDED_PATHS";
pub const STACKS_EXCLUDED_PATHS: &str = "ATMOS_STACKS_EXCLUDED_PATHS";
pub const STACKS_NAME_PATTERN: &str = "ATMOS_STACKS_NAME_PATTERN";
pub const TERRAFORM_BASE_PATH: &str = "ATMOS_COMPONENTS_TERRAFORM_BASE_PATH";
pub const TERRAFORM_APPLY_AUTO_APPROVE: &str = "ATMOS_COMPONENTS_TERRAFORM_APPLY_AUTO_APPROVE";
pub const TERRAFORM_DEPLOY_RUN_INIT: &str = "ATMOS_COMPONENTS_TERRAFORM_DEPLOY_RUN_INIT";
pub const TERRAFORM_AUTO_GENERATE_BACKEND_FILE: &str =
    "ATMOS_COMPONENTS_TERRAFORM_AUTO_GENERATE_BACKEND_FILE";
pub const HELMFILE_BASE_PATH: &str = "ATMOS_COMPONENTS_HELMFILE_BASE_PATH";
pub const HELMFILE_KUBECONFIG_PATH: &str = "ATMOS_COMPONENTS_HELMFILE_KUBECONFIG_PATH";
pub const HELMFILE_HELM_AWS_PROFILE_PATTERN: &str =
    "ATMOS_COMPONENTS_HELMFILE_HELM_AWS_PROFILE_PATTERN";
pub const HELMFILE_CLUSTER_NAME_PATTERN: &str = "ATMOS_COMPONENTS_HELMFILE_CLUSTER_NAME_PATTERN";
pub const WORKFLOWS_BASE_PATH: &str = "ATMOS_WORKFLOWS_BASE_PATH";

/// Immutable name/value view of the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// Capture the `ATMOS_*` variables (and the Windows app data variable)
    /// from the running process.
    pub fn from_process() -> Self {
        let vars = std::env::vars()
            .filter(|(name, _)| name.starts_with("ATMOS_") || name == WINDOWS_APP_DATA)
            .collect();
        Self { vars }
    }

    /// Builder used by embedding callers and tests.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    /// Value of `name` if set and non-empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Parse `name` as a boolean, if set.
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        self.get(name).map(|v| parse_bool(name, v)).transpose()
    }

    /// Split `name` on commas, if set. Empty entries are dropped.
    pub fn get_list(&self, name: &str) -> Option<Vec<String>> {
        self.get(name).map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// Parse the boolean spellings accepted for atmos settings.
pub fn parse_bool(source_name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(AtmosError::InvalidValue {
            source_name: source_name.to_string(),
            value: other.to_string(),
            message: "expected a boolean (true/false/1/0)".to_string(),
        }),
    }
}
