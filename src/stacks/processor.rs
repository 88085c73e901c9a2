//! Stack config processing.
//!
//! Turns the stack config files resolved by the locator into merged values.
//! Files are merged in resolution order, so later files override earlier ones.

use crate::config::{CliConfiguration, ComponentType, deep_merge, deep_merge_all};
use crate::error::{AtmosError, Result};
use serde_yaml::Value;
use std::path::Path;

/// Computes merged stack values from resolved stack config files.
pub trait StackProcessor {
    /// The whole stack: every resolved file deep-merged in order.
    fn describe_stack(&self, config: &CliConfiguration) -> Result<Value>;

    /// Variables of `component` in `stack`: the top-level `vars` of every
    /// file, overlaid with `components.<type>.<component>.vars` of every file.
    fn component_vars(
        &self,
        config: &CliConfiguration,
        component_type: ComponentType,
        component: &str,
        stack: &str,
    ) -> Result<Value>;
}

/// Reads stack config files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStackProcessor;

impl StackProcessor for FileStackProcessor {
    fn describe_stack(&self, config: &CliConfiguration) -> Result<Value> {
        let documents = config
            .stack_config_files_absolute_paths
            .iter()
            .map(|path| load_stack_file(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(deep_merge_all(documents))
    }

    fn component_vars(
        &self,
        config: &CliConfiguration,
        component_type: ComponentType,
        component: &str,
        stack: &str,
    ) -> Result<Value> {
        let mut global_vars = Value::Null;
        let mut component_vars = Value::Null;
        let mut found = false;

        for path in &config.stack_config_files_absolute_paths {
            let document = load_stack_file(path)?;

            if let Some(vars) = document.get("vars") {
                global_vars = deep_merge(global_vars, vars.clone());
            }

            let section = document
                .get("components")
                .and_then(|c| c.get(component_type.as_str()))
                .and_then(|t| t.get(component));
            if let Some(section) = section {
                found = true;
                if let Some(vars) = section.get("vars") {
                    component_vars = deep_merge(component_vars, vars.clone());
                }
            }
        }

        if !found {
            return Err(AtmosError::ComponentNotFound {
                component: component.to_string(),
                component_type: component_type.to_string(),
                stack: stack.to_string(),
            });
        }

        // Component vars beat stack-wide vars from any file.
        Ok(match deep_merge(global_vars, component_vars) {
            Value::Null => Value::Mapping(Default::default()),
            other => other,
        })
    }
}

/// Parse one stack config file. An empty file is an empty mapping.
pub(crate) fn load_stack_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AtmosError::UserError(format!(
            "failed to read stack config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| {
        AtmosError::UserError(format!(
            "failed to parse stack config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    match value {
        Value::Null => Ok(Value::Mapping(Default::default())),
        Value::Mapping(_) => Ok(value),
        _ => Err(AtmosError::UserError(format!(
            "invalid stack config file '{}': expected a YAML mapping at the top level",
            path.display()
        ))),
    }
}
