//! Config parsing, rendering, and lookup helpers.

use super::model::CliConfiguration;
use super::types::ComponentType;
use crate::error::{AtmosError, Result};
use std::path::Path;

impl CliConfiguration {
    /// Parse a single `atmos.yaml` fragment.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility. No overrides are applied and no paths are derived.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AtmosError::InvalidConfig(format!("failed to parse config YAML: {}", e)))
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            AtmosError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Serialize config to pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AtmosError::UserError(format!("failed to serialize config to JSON: {}", e))
        })
    }

    /// Absolute base directory for components of the given type.
    pub fn component_dir(&self, component_type: ComponentType) -> &Path {
        match component_type {
            ComponentType::Terraform => &self.terraform_dir_absolute_path,
            ComponentType::Helmfile => &self.helmfile_dir_absolute_path,
        }
    }
}
